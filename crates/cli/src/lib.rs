//! `beamhash-verify`: classify BeamHash solutions from the command line.

use beamhash_consensus::constants::BEAM_HASH_I_ROUNDS;
use beamhash_consensus::Variant;
use beamhash_log as logging;
use beamhash_pow::{classify, decode_target, solution_digest, target_reached, Difficulty};
use beamhash_primitives::{bytes_to_hex, hex_to_bytes};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq)]
struct VerifyArgs {
    header: Vec<u8>,
    nonce: Vec<u8>,
    solution: Vec<u8>,
    net_difficulty: u32,
    share_difficulty: u32,
    rounds: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TargetArgs {
    solution: Vec<u8>,
    difficulty: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Verify(VerifyArgs),
    TargetReached(TargetArgs),
}

#[derive(Debug, PartialEq, Eq)]
enum CliAction {
    Run {
        command: Command,
        log_config: logging::LogConfig,
        json: bool,
    },
    PrintHelp,
    PrintVersion,
}

#[derive(Serialize)]
struct VerifyReport {
    verdict: u8,
    name: &'static str,
    variant: Option<&'static str>,
    solution_sha256: String,
}

#[derive(Serialize)]
struct TargetReport {
    reached: bool,
    difficulty: String,
    target: String,
    solution_sha256: String,
}

pub fn run_entry() -> Result<(), String> {
    let log_config = logging::LogConfig::from_env()?;
    match parse_args_from(std::env::args().skip(1), log_config)? {
        CliAction::PrintHelp => println!("{}", usage()),
        CliAction::PrintVersion => println!("beamhash-verify {}", env!("CARGO_PKG_VERSION")),
        CliAction::Run {
            command,
            log_config,
            json,
        } => {
            logging::init(log_config);
            println!("{}", execute(&command, json)?);
        }
    }
    Ok(())
}

fn execute(command: &Command, json: bool) -> Result<String, String> {
    match command {
        Command::Verify(args) => {
            let variant = Variant::from_rounds(args.rounds);
            logging::log_debug!(
                "verifying {}-byte solution as {}",
                args.solution.len(),
                variant.map_or("unknown variant", Variant::as_str)
            );
            let verdict = classify(
                &args.header,
                &args.nonce,
                &args.solution,
                args.net_difficulty,
                args.share_difficulty,
                args.rounds,
            )
            .map_err(|err| err.to_string())?;
            if !json {
                return Ok(format!("{} {}", verdict.code(), verdict));
            }
            render_json(&VerifyReport {
                verdict: verdict.code(),
                name: verdict.as_str(),
                variant: variant.map(Variant::as_str),
                solution_sha256: bytes_to_hex(&solution_digest(&args.solution)),
            })
        }
        Command::TargetReached(args) => {
            let reached = target_reached(&args.solution, args.difficulty);
            if !json {
                return Ok(reached.to_string());
            }
            render_json(&TargetReport {
                reached,
                difficulty: Difficulty(args.difficulty).to_string(),
                target: bytes_to_hex(&decode_target(args.difficulty).to_big_endian()),
                solution_sha256: bytes_to_hex(&solution_digest(&args.solution)),
            })
        }
    }
}

fn render_json<T: Serialize>(report: &T) -> Result<String, String> {
    serde_json::to_string(report).map_err(|err| format!("failed to render json: {err}"))
}

fn parse_args_from<I>(raw_args: I, mut log_config: logging::LogConfig) -> Result<CliAction, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = raw_args.into_iter();
    let command = match args.next() {
        Some(command) => command,
        None => return Err(format!("missing command\n{}", usage())),
    };
    match command.as_str() {
        "help" | "--help" | "-h" => return Ok(CliAction::PrintHelp),
        "version" | "--version" | "-V" => return Ok(CliAction::PrintVersion),
        "verify" | "target-reached" => {}
        other => return Err(format!("unknown command '{other}'\n{}", usage())),
    }

    let mut header: Option<Vec<u8>> = None;
    let mut nonce: Option<Vec<u8>> = None;
    let mut solution: Option<Vec<u8>> = None;
    let mut net_difficulty: Option<u32> = None;
    let mut share_difficulty: Option<u32> = None;
    let mut difficulty: Option<u32> = None;
    let mut rounds: Option<u32> = None;
    let mut json = false;

    while let Some(arg) = args.next() {
        let mut value_for = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}\n{}", usage()))
        };
        match arg.as_str() {
            "--header" => header = Some(parse_hex_arg("--header", &value_for("--header")?)?),
            "--nonce" => nonce = Some(parse_hex_arg("--nonce", &value_for("--nonce")?)?),
            "--solution" => {
                solution = Some(parse_hex_arg("--solution", &value_for("--solution")?)?)
            }
            "--net-diff" => {
                net_difficulty = Some(parse_difficulty(&value_for("--net-diff")?)?);
            }
            "--share-diff" => {
                share_difficulty = Some(parse_difficulty(&value_for("--share-diff")?)?);
            }
            "--diff" => difficulty = Some(parse_difficulty(&value_for("--diff")?)?),
            "--rounds" => {
                let value = value_for("--rounds")?;
                rounds = Some(
                    value
                        .parse::<u32>()
                        .map_err(|_| format!("invalid --rounds '{value}'\n{}", usage()))?,
                );
            }
            "--json" => json = true,
            "--log-level" => {
                let value = value_for("--log-level")?;
                log_config.level = logging::Level::parse(&value)
                    .ok_or_else(|| format!("invalid log level '{value}'\n{}", usage()))?;
            }
            "--log-format" => {
                let value = value_for("--log-format")?;
                log_config.format = logging::Format::parse(&value)
                    .ok_or_else(|| format!("invalid log format '{value}'\n{}", usage()))?;
            }
            "--log-timestamps" => log_config.timestamps = true,
            "--no-log-timestamps" => log_config.timestamps = false,
            "--help" | "-h" => return Ok(CliAction::PrintHelp),
            other => return Err(format!("unknown argument '{other}'\n{}", usage())),
        }
    }

    let command = if command == "verify" {
        if difficulty.is_some() {
            return Err(format!("--diff does not apply to verify\n{}", usage()));
        }
        Command::Verify(VerifyArgs {
            header: required(header, "--header")?,
            nonce: required(nonce, "--nonce")?,
            solution: required(solution, "--solution")?,
            net_difficulty: required(net_difficulty, "--net-diff")?,
            share_difficulty: required(share_difficulty, "--share-diff")?,
            rounds: rounds.unwrap_or(BEAM_HASH_I_ROUNDS),
        })
    } else {
        for (flag, set) in [
            ("--header", header.is_some()),
            ("--nonce", nonce.is_some()),
            ("--net-diff", net_difficulty.is_some()),
            ("--share-diff", share_difficulty.is_some()),
            ("--rounds", rounds.is_some()),
        ] {
            if set {
                return Err(format!("{flag} does not apply to target-reached\n{}", usage()));
            }
        }
        Command::TargetReached(TargetArgs {
            solution: required(solution, "--solution")?,
            difficulty: required(difficulty, "--diff")?,
        })
    };

    Ok(CliAction::Run {
        command,
        log_config,
        json,
    })
}

fn required<T>(value: Option<T>, flag: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("missing required {flag}\n{}", usage()))
}

fn parse_hex_arg(flag: &str, value: &str) -> Result<Vec<u8>, String> {
    hex_to_bytes(value).map_err(|err| format!("invalid {flag}: {err}"))
}

/// Decimal, or hex with a `0x` prefix.
fn parse_difficulty(value: &str) -> Result<u32, String> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => trimmed.parse::<u32>(),
    };
    parsed.map_err(|_| format!("invalid difficulty '{value}'"))
}

fn usage() -> String {
    [
        "Usage:",
        "  beamhash-verify <command> [options]",
        "",
        "Commands:",
        "  verify          Classify a solution (0 invalid, 1 low difficulty, 2 share, 3 block)",
        "  target-reached  Check a solution digest against one difficulty",
        "  help            Print this help and exit",
        "  version         Print version and exit",
        "",
        "verify options:",
        "  --header HEX      32-byte block header hash",
        "  --nonce HEX       8-byte nonce",
        "  --solution HEX    104-byte packed solution",
        "  --net-diff D      Network difficulty (decimal or 0x hex)",
        "  --share-diff D    Share difficulty (decimal or 0x hex)",
        "  --rounds R        0 for BeamHash I, 3 for BeamHash II (default: 0)",
        "",
        "target-reached options:",
        "  --solution HEX    Packed solution",
        "  --diff D          Difficulty (decimal or 0x hex)",
        "",
        "Common options:",
        "  --json  Print a JSON object instead of plain text",
        "  --log-level  Log verbosity (error|warn|info|debug|trace) (default: info)",
        "  --log-format  Log output format (text|json) (default: text)",
        "  --log-timestamps  Prefix text logs with a UTC timestamp (default)",
        "  --no-log-timestamps  Omit timestamps from text logs",
        "",
        "Logging defaults can also be set with BEAMHASH_LOG_LEVEL, BEAMHASH_LOG_FORMAT and",
        "BEAMHASH_LOG_TIMESTAMPS.",
    ]
    .join("\n")
}
