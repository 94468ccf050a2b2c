use std::{fs, path::Path};

use anyhow::Context;
use mediator::sim::Media;
use protocol::Command;

/// A recorded UI session to play against a simulated engine.
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub commands: Vec<Command>,
    #[serde(default)]
    pub media: Media,
}

impl Scenario {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let conts = fs::read_to_string(path)
            .with_context(|| format!("reading scenario at {:?}", path))?;
        Self::parse(&conts)
    }

    pub fn parse(conts: &str) -> anyhow::Result<Self> {
        toml::from_str(conts).context("parsing scenario as TOML")
    }
}
