// Copyright 2026 Hammdist Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(
    name = "hammdist",
    version,
    about = "Hamming distance between 64-bit integers, as a SQLite function"
)]
pub struct Cli {
    /// Config file (defaults to the global hammdist.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the distance between two words
    Dist(DistArgs),

    /// Run one SQL statement with hammdist registered
    Query(QueryArgs),

    /// Check the popcount kernel and the registered function
    Doctor {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct DistArgs {
    /// First word (decimal or 0x-prefixed hex)
    #[arg(value_parser = parse_word, allow_hyphen_values = true)]
    pub a: i64,

    /// Second word (decimal or 0x-prefixed hex)
    #[arg(value_parser = parse_word, allow_hyphen_values = true)]
    pub b: i64,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// SQL statement; anything after the first statement is ignored
    pub sql: String,

    /// Database file (defaults to db_path from config, then in-memory)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

/// Hex words are raw bit patterns, so `0xFFFFFFFFFFFFFFFF` is `-1`.
pub fn parse_word(text: &str) -> Result<i64, String> {
    let trimmed = text.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"));
    if let Some(digits) = hex {
        return u64::from_str_radix(&digits.replace('_', ""), 16)
            .map(|v| v as i64)
            .map_err(|err| format!("invalid hex word '{text}': {err}"));
    }
    trimmed
        .parse::<i64>()
        .map_err(|err| format!("invalid integer '{text}': {err}"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_decimal_and_hex_words() {
        assert_eq!(parse_word("5"), Ok(5));
        assert_eq!(parse_word("-1"), Ok(-1));
        assert_eq!(parse_word(" 42 "), Ok(42));
        assert_eq!(parse_word("0xff"), Ok(255));
        assert_eq!(parse_word("0XFFFF_FFFF_FFFF_FFFF"), Ok(-1));
        assert_eq!(parse_word("0x8000000000000000"), Ok(i64::MIN));
    }

    #[test]
    fn rejects_bad_words() {
        assert!(parse_word("abc").is_err());
        assert!(parse_word("0x1_0000_0000_0000_0000").is_err());
        assert!(parse_word("9223372036854775808").is_err());
        assert!(parse_word("").is_err());
    }

    #[test]
    fn negative_positionals_are_values() {
        let cli = Cli::try_parse_from(["hammdist", "dist", "0", "-1", "--json"]).expect("parse");
        match cli.command {
            Commands::Dist(args) => {
                assert_eq!((args.a, args.b), (0, -1));
                assert!(args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
