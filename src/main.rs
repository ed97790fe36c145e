use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use std::env;
use std::fs;
use std::path::PathBuf;

use rune_compose::{
    ComponentDescriptor, ContainerCache, HostAnimatableFactory, LayerComposer, LayerStyles,
};
use rune_config::LayersConfig;
use rune_style::{classify_key, flatten};

const USAGE: &str = "Usage: rune-layers <descriptor.json> [--fast-style <json>] \
[--general-style <json>] [--classify] [--compact] [--out <file>]";

#[derive(Debug, Default)]
struct Args {
    input: PathBuf,
    fast_style: Option<String>,
    general_style: Option<String>,
    classify: bool,
    compact: bool,
    out: Option<PathBuf>,
}

fn parse_args(mut args: Vec<String>) -> Result<Args> {
    if args.is_empty() {
        eprintln!("{USAGE}");
        bail!("missing <descriptor.json>");
    }
    let mut parsed = Args {
        input: PathBuf::from(args.remove(0)),
        ..Default::default()
    };
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--fast-style" | "--general-style" | "--out" => {
                if i + 1 >= args.len() {
                    bail!("{} expects a value", args[i]);
                }
                let value = args[i + 1].clone();
                match args[i].as_str() {
                    "--fast-style" => parsed.fast_style = Some(value),
                    "--general-style" => parsed.general_style = Some(value),
                    _ => parsed.out = Some(PathBuf::from(value)),
                }
                i += 2;
            }
            "--classify" => {
                parsed.classify = true;
                i += 1;
            }
            "--compact" => {
                parsed.compact = true;
                i += 1;
            }
            other => bail!("unknown argument: {other}\n{USAGE}"),
        }
    }
    Ok(parsed)
}

fn parse_json(flag: &str, source: Option<&str>) -> Result<Value> {
    match source {
        Some(source) => {
            serde_json::from_str(source).with_context(|| format!("{flag} is not valid JSON"))
        }
        None => Ok(Value::Null),
    }
}

/// Bucket names for every key of the component's flattened style.
fn classification(component: &ComponentDescriptor) -> Value {
    let mut out = Map::new();
    if let Some(flat) = flatten(component.props.style.as_ref()) {
        for key in flat.keys() {
            let buckets = classify_key(key)
                .iter()
                .map(|bucket| Value::String(bucket.as_str().to_string()))
                .collect();
            out.insert(key.clone(), Value::Array(buckets));
        }
    }
    Value::Object(out)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args(env::args().skip(1).collect())?;
    let config = LayersConfig::load();
    if let Some(categories) = config.diagnostics.as_deref() {
        // Read once by the style crate; set before any composition runs.
        unsafe { env::set_var("RUNE_DIAGNOSTICS", categories) };
    }

    if !args.input.exists() {
        bail!("input file not found: {}", args.input.display());
    }
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let component = ComponentDescriptor::from_json(&source)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;

    let output = if args.classify || config.snapshot.classify {
        classification(&component)
    } else {
        let extra = LayerStyles::from_values(
            parse_json("--fast-style", args.fast_style.as_deref())?,
            parse_json("--general-style", args.general_style.as_deref())?,
        )?;
        let factory = HostAnimatableFactory;
        let composer =
            LayerComposer::new(&factory).with_base_container(&config.compose.base_container);
        let cache = ContainerCache::prime(&factory, composer.base_container());
        log::info!(
            "composing {} with base container {}",
            component.component_type.name(),
            config.compose.base_container
        );
        composer.compose(&component, &extra, Some(&cache)).to_value()?
    };

    let rendered = if args.compact || !config.snapshot.pretty {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    match args.out {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rune_style::StyleInput;
    use serde_json::json;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags_after_the_input() {
        let parsed = parse_args(args(&[
            "card.json",
            "--fast-style",
            r#"{"opacity":0}"#,
            "--classify",
            "--out",
            "out.json",
        ]))
        .unwrap();
        assert_eq!(parsed.input, PathBuf::from("card.json"));
        assert_eq!(parsed.fast_style.as_deref(), Some(r#"{"opacity":0}"#));
        assert!(parsed.classify);
        assert!(!parsed.compact);
        assert_eq!(parsed.out, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn rejects_missing_values_and_unknown_flags() {
        assert!(parse_args(Vec::new()).is_err());
        assert!(parse_args(args(&["card.json", "--out"])).is_err());
        assert!(parse_args(args(&["card.json", "--verbose"])).is_err());
    }

    #[test]
    fn style_flags_default_to_null() {
        assert_eq!(parse_json("--fast-style", None).unwrap(), Value::Null);
        assert_eq!(
            parse_json("--fast-style", Some(r#"{"opacity":1}"#)).unwrap(),
            json!({ "opacity": 1 })
        );
        assert!(parse_json("--fast-style", Some("{opacity")).is_err());
    }

    #[test]
    fn classification_lists_buckets_per_key() {
        let component = ComponentDescriptor::primitive("View").with_style(
            StyleInput::from_value(json!({ "opacity": 1, "borderColor": "red", "margin": 2 }))
                .unwrap(),
        );
        assert_eq!(
            classification(&component),
            json!({
                "opacity": ["fast_driver"],
                "borderColor": ["general_driver"],
                "margin": ["fast_driver"],
            })
        );
    }
}
