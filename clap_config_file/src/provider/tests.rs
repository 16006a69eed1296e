//! Unit tests for the file-format providers.

use super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::scratch::Scratch;

#[fixture]
fn scratch() -> Scratch {
    Scratch::new().unwrap_or_else(|err| panic!("create scratch directory: {err}"))
}

#[rstest]
fn toml_values_keep_their_types(scratch: Scratch) -> Result<()> {
    let path = scratch.write(
        "config",
        "who = \"Universe\"\nloud = true\ncount = 3\nratio = 0.5\nnames = [\"a\", \"b\"]\n",
    )?;
    let map = TomlProvider::new()
        .load(&path, "cli")
        .map_err(|err| anyhow!(err))?;
    ensure!(map.get("who") == Some(&json!("Universe")), "who: {map:?}");
    ensure!(map.get("loud") == Some(&json!(true)), "loud: {map:?}");
    ensure!(map.get("count") == Some(&json!(3)), "count: {map:?}");
    ensure!(map.get("ratio") == Some(&json!(0.5)), "ratio: {map:?}");
    ensure!(map.get("names") == Some(&json!(["a", "b"])), "names: {map:?}");
    Ok(())
}

#[rstest]
fn toml_datetimes_become_strings(scratch: Scratch) -> Result<()> {
    let path = scratch.write(
        "config",
        "when = 1979-05-27\nat = 1979-05-27T07:32:00Z\nslots = [07:30:00]\n\n[run]\nsince = 2024-01-02\n",
    )?;
    let map = TomlProvider::new()
        .load(&path, "cli")
        .map_err(|err| anyhow!(err))?;
    ensure!(map.get("when") == Some(&json!("1979-05-27")), "when: {map:?}");
    ensure!(map.get("at") == Some(&json!("1979-05-27T07:32:00Z")), "at: {map:?}");
    ensure!(map.get("slots") == Some(&json!(["07:30:00"])), "slots: {map:?}");
    ensure!(
        map.get("run") == Some(&json!({"since": "2024-01-02"})),
        "run: {map:?}"
    );
    Ok(())
}

#[rstest]
fn missing_file_yields_empty_map(scratch: Scratch) -> Result<()> {
    let map = TomlProvider::new()
        .load(&scratch.root().join("nosuchfile"), "cli")
        .map_err(|err| anyhow!(err))?;
    ensure!(map.is_empty(), "expected no defaults, got {map:?}");
    Ok(())
}

#[rstest]
fn directory_yields_empty_map(scratch: Scratch) -> Result<()> {
    let map = TomlProvider::new()
        .load(scratch.root(), "cli")
        .map_err(|err| anyhow!(err))?;
    ensure!(map.is_empty(), "expected no defaults, got {map:?}");
    Ok(())
}

#[rstest]
fn broken_file_is_rejected(scratch: Scratch) -> Result<()> {
    let path = scratch.write("config", "Ceci n'est pas une config.")?;
    let Err(err) = TomlProvider::new().load(&path, "cli") else {
        return Err(anyhow!("expected a parse failure"));
    };
    ensure!(
        err.to_string().contains("failed to parse"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
fn section_narrows_the_result(scratch: Scratch) -> Result<()> {
    let path = scratch.write(
        "config",
        "top = 1\n\n[mysection]\ntestvalue = true\n\n[other]\ntestvalue = false\n",
    )?;
    let map = TomlProvider::new()
        .section("mysection")
        .load(&path, "cli")
        .map_err(|err| anyhow!(err))?;
    ensure!(map.len() == 1, "expected a single key, got {map:?}");
    ensure!(map.get("testvalue") == Some(&json!(true)), "got {map:?}");
    Ok(())
}

#[rstest]
fn absent_section_yields_empty_map(scratch: Scratch) -> Result<()> {
    let path = scratch.write("config", "testvalue = true\n")?;
    let map = TomlProvider::new()
        .section("Test")
        .load(&path, "cli")
        .map_err(|err| anyhow!(err))?;
    ensure!(map.is_empty(), "expected no defaults, got {map:?}");
    Ok(())
}

#[rstest]
fn scalar_section_is_rejected(scratch: Scratch) -> Result<()> {
    let path = scratch.write("config", "mysection = 3\n")?;
    let result = TomlProvider::new().section("mysection").load(&path, "cli");
    ensure!(result.is_err(), "expected failure, got {result:?}");
    Ok(())
}

#[rstest]
fn closures_are_providers() -> Result<()> {
    let provider = |path: &Utf8Path, name: &str| -> Result<DefaultMap, BoxError> {
        Ok([("seen", json!(format!("{name}:{path}")))].into_iter().collect())
    };
    let map = provider
        .load(Utf8Path::new("/nowhere"), "cli")
        .map_err(|err| anyhow!(err))?;
    ensure!(map.get("seen") == Some(&json!("cli:/nowhere")), "got {map:?}");
    Ok(())
}

#[cfg(feature = "json")]
#[rstest]
fn json_objects_are_loaded(scratch: Scratch) -> Result<()> {
    let path = scratch.write("config.json", r#"{"who": "Universe", "sub": {"x": 1}}"#)?;
    let map = JsonProvider::new()
        .section("sub")
        .load(&path, "cli")
        .map_err(|err| anyhow!(err))?;
    ensure!(map.get("x") == Some(&json!(1)), "got {map:?}");
    let top = JsonProvider::new()
        .load(&path, "cli")
        .map_err(|err| anyhow!(err))?;
    ensure!(top.get("who") == Some(&json!("Universe")), "got {top:?}");
    Ok(())
}

#[cfg(feature = "json")]
#[rstest]
fn json_arrays_are_rejected(scratch: Scratch) -> Result<()> {
    let path = scratch.write("config.json", "[1, 2]")?;
    ensure!(JsonProvider::new().load(&path, "cli").is_err());
    Ok(())
}

#[cfg(feature = "yaml")]
#[rstest]
fn yaml_uses_strict_booleans(scratch: Scratch) -> Result<()> {
    let path = scratch.write("config.yaml", "loud: true\nanswer: yes\n")?;
    let map = YamlProvider::new()
        .load(&path, "cli")
        .map_err(|err| anyhow!(err))?;
    ensure!(map.get("loud") == Some(&json!(true)), "got {map:?}");
    ensure!(map.get("answer") == Some(&json!("yes")), "got {map:?}");
    Ok(())
}
