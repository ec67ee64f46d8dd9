//! Command-line options for the terminal runner.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::core::RulesConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// JSON ruleset file; missing fields take the standard values.
    pub config_path: Option<PathBuf>,
    /// Fixed bag seed. Restarts reuse it.
    pub seed: Option<u64>,
    /// Any successful move refreshes lock delay.
    pub infinite_spin: bool,
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<RunOptions> {
    let mut options = RunOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let v = iter
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                options.config_path = Some(PathBuf::from(v));
            }
            "--seed" => {
                let v = iter
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                let seed = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                options.seed = Some(seed);
            }
            "--infinite-spin" => options.infinite_spin = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
    }

    Ok(options)
}

impl RunOptions {
    /// Build the ruleset: the config file (or defaults), then flag overrides.
    pub fn rules(&self) -> Result<RulesConfig> {
        let mut rules = match &self.config_path {
            Some(path) => RulesConfig::from_json_file(path)
                .with_context(|| format!("loading ruleset from {}", path.display()))?,
            None => RulesConfig::default(),
        };
        if self.infinite_spin {
            rules.lock_reset = RulesConfig::infinite_spin().lock_reset;
        }
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LockResetPolicy;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_args_defaults() {
        let options = parse_args(&[]).unwrap();
        assert_eq!(options, RunOptions::default());
        assert_eq!(options.rules().unwrap(), RulesConfig::default());
    }

    #[test]
    fn parse_args_reads_every_flag() {
        let options = parse_args(&args(&[
            "--seed",
            "42",
            "--infinite-spin",
            "--config",
            "rules.json",
        ]))
        .unwrap();
        assert_eq!(options.seed, Some(42));
        assert!(options.infinite_spin);
        assert_eq!(options.config_path, Some(PathBuf::from("rules.json")));
    }

    #[test]
    fn parse_args_rejects_bad_input() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "abc"])).is_err());
        assert!(parse_args(&args(&["--fast"])).is_err());
    }

    #[test]
    fn infinite_spin_flag_overrides_policy() {
        let options = RunOptions {
            infinite_spin: true,
            ..RunOptions::default()
        };
        assert_eq!(
            options.rules().unwrap().lock_reset,
            LockResetPolicy::ResetOnAnyMove
        );
    }

    #[test]
    fn missing_config_file_has_context() {
        let options = RunOptions {
            config_path: Some(PathBuf::from("/nonexistent/srs-rules.json")),
            ..RunOptions::default()
        };
        let err = options.rules().unwrap_err();
        assert!(format!("{err:#}").contains("loading ruleset"));
    }
}
