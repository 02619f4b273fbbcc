//! recordkit CLI: windowed traversal and record transforms over JSON object files.
//!
//! Defaults for the traversal window and output mode come from `IterConfig::from_env()`;
//! explicit flags win. Every command writes to the supplied writer.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::assign;
use crate::config::IterConfig;
use crate::iterate::{self, Window};
use crate::keys::{is_key_of, try_key_of};
use crate::obj::Obj;
use crate::range;

#[derive(Parser, Debug)]
#[command(
    name = "recordkit",
    version,
    about = "Windowed keyed traversal over JSON records",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct WindowArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub start: Option<isize>,
    #[arg(long, allow_negative_numbers = true)]
    pub end: Option<isize>,
    #[arg(long, allow_negative_numbers = true)]
    pub step: Option<isize>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// (key, value, index) triples
    Entries {
        #[arg(long)]
        file: PathBuf,
        #[command(flatten)]
        window: WindowArgs,
        #[arg(long)]
        json: bool,
    },
    Keys {
        #[arg(long)]
        file: PathBuf,
        #[command(flatten)]
        window: WindowArgs,
        #[arg(long)]
        json: bool,
    },
    Values {
        #[arg(long)]
        file: PathBuf,
        #[command(flatten)]
        window: WindowArgs,
        #[arg(long)]
        json: bool,
    },
    /// Exit status 0 if the key exists, 2 otherwise
    HasKey {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        key: String,
    },
    /// Merge patch files into the record, later patches win
    Override {
        #[arg(long)]
        file: PathBuf,
        #[arg(long = "patch")]
        patches: Vec<PathBuf>,
    },
    /// Fill null values from a fallback record
    Defaults {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        fallback: PathBuf,
    },
    /// Multiply numeric values; non-numeric values are absent
    MapNumbers {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value_t = 1.0)]
        factor: f64,
        #[command(flatten)]
        window: WindowArgs,
        /// Keep absent results as null
        #[arg(long)]
        keep_absent: bool,
    },
    /// Inclusive numeric range
    Range {
        #[arg(long, allow_negative_numbers = true)]
        start: i64,
        #[arg(long, allow_negative_numbers = true)]
        end: i64,
        #[arg(long, default_value_t = 1)]
        step: i64,
    },
}

/// Outcome for the process: `Ok(false)` means "ran fine, answer is no" (has-key).
pub type Verdict = bool;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = IterConfig::from_env();
    debug!("recordkit: {}", cfg);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let verdict = exec(cli.cmd, &cfg, &mut out)?;
    out.flush()?;
    if !verdict {
        std::process::exit(2);
    }
    Ok(())
}

pub fn exec(cmd: Cmd, cfg: &IterConfig, out: &mut dyn Write) -> Result<Verdict> {
    match cmd {
        Cmd::Entries { file, window, json } => {
            let obj = load_obj(&file)?;
            let w = resolve_window(cfg, &window);
            if json || cfg.json {
                let rows: Vec<Value> = iterate::entries(&obj, w)
                    .map(|e| json!({"key": e.key.as_str(), "value": e.value, "index": e.index}))
                    .collect();
                writeln!(out, "{}", Value::Array(rows))?;
            } else {
                let mut n = 0usize;
                for e in iterate::entries(&obj, w) {
                    writeln!(out, "[{}] {} = {}", e.index, e.key, e.value)?;
                    n += 1;
                }
                if n == 0 {
                    writeln!(out, "(no items)")?;
                }
            }
        }

        Cmd::Keys { file, window, json } => {
            let obj = load_obj(&file)?;
            let w = resolve_window(cfg, &window);
            let keys: Vec<String> = iterate::keys(&obj, w).map(|k| k.into_string()).collect();
            if json || cfg.json {
                writeln!(out, "{}", serde_json::to_string(&keys)?)?;
            } else {
                for k in keys {
                    writeln!(out, "{}", k)?;
                }
            }
        }

        Cmd::Values { file, window, json } => {
            let obj = load_obj(&file)?;
            let w = resolve_window(cfg, &window);
            let values: Vec<&Value> = iterate::values(&obj, w).collect();
            if json || cfg.json {
                writeln!(out, "{}", serde_json::to_string(&values)?)?;
            } else {
                for v in values {
                    writeln!(out, "{}", v)?;
                }
            }
        }

        Cmd::HasKey { file, key } => {
            let obj = load_obj(&file)?;
            let found = is_key_of(&key, &obj);
            match try_key_of(&key, &obj) {
                Some(k) => writeln!(out, "{} = {}", k, obj[k.as_str()])?,
                None => writeln!(out, "{}: not a key", key)?,
            }
            return Ok(found);
        }

        Cmd::Override { file, patches } => {
            let mut obj = load_obj(&file)?;
            let loaded = patches
                .iter()
                .map(|p| load_obj(p))
                .collect::<Result<Vec<_>>>()?;
            let refs: Vec<&Obj<Value>> = loaded.iter().collect();
            assign::override_with(&mut obj, &refs);
            info!("override: applied {} patch(es) to {}", refs.len(), file.display());
            writeln!(out, "{}", serde_json::to_string(&obj)?)?;
        }

        Cmd::Defaults { file, fallback } => {
            let mut obj = nulls_to_absent(load_obj(&file)?);
            let fb = nulls_to_absent(load_obj(&fallback)?);
            assign::defaults(&mut obj, &fb);
            let filled: Obj<Value> = obj
                .into_iter()
                .map(|(k, v)| (k, v.unwrap_or(Value::Null)))
                .collect();
            writeln!(out, "{}", serde_json::to_string(&filled)?)?;
        }

        Cmd::MapNumbers {
            file,
            factor,
            window,
            keep_absent,
        } => {
            let obj = load_obj(&file)?;
            let w = resolve_window(cfg, &window);
            let scale = |v: &Value| v.as_f64().map(|n| json!(n * factor));
            let text = if keep_absent || !cfg.filter_absent {
                let all = iterate::map_all(iterate::values(&obj, w), |v, _, _| scale(v));
                serde_json::to_string(&all)?
            } else {
                let kept = iterate::map(iterate::values(&obj, w), |v, _, _| scale(v));
                serde_json::to_string(&kept)?
            };
            writeln!(out, "{}", text)?;
        }

        Cmd::Range { start, end, step } => {
            if step <= 0 {
                return Err(anyhow!("range: step must be positive, got {}", step));
            }
            writeln!(out, "{}", serde_json::to_string(&range::range(start, end, step))?)?;
        }
    }
    Ok(true)
}

fn resolve_window(cfg: &IterConfig, args: &WindowArgs) -> Window {
    let base = cfg.window();
    Window {
        start: args.start.or(base.start),
        end: args.end.or(base.end),
        step: args.step.unwrap_or(base.step),
    }
}

pub fn load_obj(path: &Path) -> Result<Obj<Value>> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let obj = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse JSON object from {}", path.display()))?;
    Ok(obj)
}

// JSON null stands in for the absent sentinel.
fn nulls_to_absent(obj: Obj<Value>) -> Obj<Option<Value>> {
    obj.into_iter()
        .map(|(k, v)| (k, if v.is_null() { None } else { Some(v) }))
        .collect()
}
