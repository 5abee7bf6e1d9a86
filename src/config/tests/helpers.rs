//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::HeraldConfig;

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Composes a [`HeraldConfig`] from `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> HeraldConfig {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    HeraldConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// Configuration with the two required inputs set.
pub fn minimal_config() -> HeraldConfig {
    HeraldConfig {
        repository: Some("octo/widgets".to_owned()),
        token: Some("ghp_example".to_owned()),
        ..HeraldConfig::default()
    }
}

/// Lookup that knows no environment variables.
pub fn no_environment(_: &str) -> Option<String> {
    None
}
