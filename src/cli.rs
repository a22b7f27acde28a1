// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::env;
use std::path::PathBuf;

use colored::Colorize;

/// What to do, taken from the first argument. Anything unknown is `Help`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Help,
    Export,
    Manifest,
    Names,
    Packs,
    Stage(PathBuf),
    Clean,
}

/// Command line of one run. `args[0]` is the binary, `args[1]` the action
pub struct Cli {
    pub args: Vec<String>,
}

impl Cli {
    /// Takes the arguments of the current process
    pub fn new() -> Self {
        Self::from_args(env::args().collect())
    }

    pub fn from_args(args: Vec<String>) -> Self {
        Self { args }
    }

    /// Picks the action from the first argument. `stage` without a directory
    /// falls back to `Help`
    pub fn get_action(&self) -> Action {
        let Some(action) = self.args.get(1) else {
            return Action::Help;
        };

        match action.as_str() {
            "export" => Action::Export,
            "manifest" => Action::Manifest,
            "names" => Action::Names,
            "packs" => Action::Packs,
            "clean" => Action::Clean,
            "stage" => match self.args.get(2) {
                Some(dir) => Action::Stage(PathBuf::from(dir)),
                None => Action::Help,
            },
            _ => Action::Help,
        }
    }

    /// Config files follow the action (and the directory for `stage`)
    pub fn config_paths(&self, action: &Action) -> Vec<PathBuf> {
        let skip = match action {
            Action::Stage(_) => 3,
            _ => 2,
        };

        self.args.iter().skip(skip).map(PathBuf::from).collect()
    }

    /// Usage of every action, printed for `help` and on a missing config
    pub fn print_help(&self) {
        println!("{} prepares the gradle project of an android export", "gradle-export".green().bold());
        println!("  - gradle-export export export.toml       | manifest, name strings and {}", "asset packs".red());
        println!("  - gradle-export manifest export.toml     | write the manifest only");
        println!("  - gradle-export names export.toml        | write localized project name strings");
        println!("  - gradle-export packs export.toml        | build {} modules", "asset pack".red());
        println!("  - gradle-export stage dir/ export.toml   | copy exported files into gradle assets");
        println!("  - gradle-export clean export.toml        | delete everything a previous export left in android/build");
        println!("  - gradle-export help                     | show help info");
        println!("Several config files can be given, later ones override earlier ones");
        println!("  - gradle-export {} base.toml release.toml", "export".red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::from_args(args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_actions() {
        assert_eq!(cli(&["gradle-export"]).get_action(), Action::Help);
        assert_eq!(cli(&["gradle-export", "bogus"]).get_action(), Action::Help);
        assert_eq!(cli(&["gradle-export", "export", "a.toml"]).get_action(), Action::Export);
        assert_eq!(cli(&["gradle-export", "packs"]).get_action(), Action::Packs);
        assert_eq!(cli(&["gradle-export", "stage"]).get_action(), Action::Help);
        assert_eq!(
            cli(&["gradle-export", "stage", "out", "a.toml"]).get_action(),
            Action::Stage(PathBuf::from("out"))
        );
    }

    #[test]
    fn test_config_paths() {
        let c = cli(&["gradle-export", "export", "a.toml", "b.toml"]);
        assert_eq!(
            c.config_paths(&c.get_action()),
            vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
        );

        let c = cli(&["gradle-export", "stage", "out", "a.toml"]);
        assert_eq!(c.config_paths(&c.get_action()), vec![PathBuf::from("a.toml")]);
    }
}
