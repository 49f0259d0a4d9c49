//! Single-file inspection: run one SVG through the pipeline and print the
//! resulting record.

use crate::{config::IconConfig, svg::extract_svg_data};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::{fs, path::Path};

use super::InspectArgs;

/// Print `{ "<name>": <record> }` for `args.file` on stdout.
pub fn inspect_icon(config: &IconConfig, args: &InspectArgs) -> Result<()> {
    let json = render(config, args)?;
    println!("{json}");
    Ok(())
}

fn render(config: &IconConfig, args: &InspectArgs) -> Result<String> {
    let markup = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("not a file: {}", args.file.display()))?;
    let category = args
        .category
        .clone()
        .unwrap_or_else(|| parent_category(&args.file));

    let icon = extract_svg_data(&markup, filename, &category, &config.svg.extract_options())
        .with_context(|| format!("failed to process {}", args.file.display()))?;

    let mut map = Map::new();
    map.insert(icon.name, serde_json::to_value(&icon.record)?);
    let value = Value::Object(map);
    Ok(if args.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    })
}

/// Name of the directory holding `file`, or empty for bare file names.
fn parent_category(file: &Path) -> String {
    file.parent()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn args(cli: &[&str]) -> InspectArgs {
        match Cli::parse_from(cli).command {
            Commands::Inspect { args } => args,
            Commands::Build { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_render_uses_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("brands").join("logo.svg");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, r#"<svg viewBox="0 0 24 24"><path d="M1 1h22"/></svg>"#).unwrap();

        let path = file.to_str().unwrap();
        let out = render(&IconConfig::default(), &args(&["iconpack", "inspect", path])).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["logo-svg"]["category"], "brands");
        assert_eq!(value["logo-svg"]["tags"][0], "brands");

        let out = render(&IconConfig::default(), &args(&["iconpack", "inspect", path, "-c", "ui"])).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["logo-svg"]["category"], "ui");
    }

    #[test]
    fn test_parent_category() {
        assert_eq!(parent_category(Path::new("icons/arrows/up.svg")), "arrows");
        assert_eq!(parent_category(Path::new("up.svg")), "");
    }

    #[test]
    fn test_missing_file() {
        let err = render(&IconConfig::default(), &args(&["iconpack", "inspect", "/nope/x.svg"])).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }
}
