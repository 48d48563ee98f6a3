use std::fs;
use std::path::{Path, PathBuf};
use std::{process, str::FromStr};
use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};
use fountain_sync::{
    api,
    analyze_with,
    apply_patch,
    export_fdx,
    import_fdx,
    is_valid,
    serialize,
    validate_with,
    CharacterProfile,
    Conf,
    FountainParser,
    FountainResult,
    OutlineEntry,
    Patch
};

#[derive(Parser, Debug)]
#[command(name = "fountain-sync", version, about = "Fountain 剧本解析、校验、差分与大纲对账")]
struct Cli {
    /// TOML 配置文件
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 日志级别（off, error, warn, info, debug, trace）
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 解析并输出剧本 JSON
    Parse { input: PathBuf },
    /// 规范化格式后输出 Fountain 文本
    Fmt {
        input: PathBuf,
        /// 直接写回原文件
        #[arg(long)]
        write: bool,
    },
    /// 校验格式，有 error 级问题时退出码为 1
    Check {
        input: PathBuf,
        /// 以 JSON 输出问题列表
        #[arg(long)]
        json: bool,
    },
    /// 输出统计信息 JSON
    Stats { input: PathBuf },
    /// 依次比较相邻的版本，每对输出一行补丁 JSON（相同则输出 null）
    Diff {
        #[arg(required = true, num_args = 2..)]
        revisions: Vec<PathBuf>,
    },
    /// 在旧文本上回放补丁
    Apply { base: PathBuf, patch: PathBuf },
    /// 与已有大纲对账，输出新的大纲 JSON
    Outline {
        input: PathBuf,
        /// 已有大纲条目（JSON 数组）
        #[arg(long)]
        existing: Option<PathBuf>,
        /// 角色档案（JSON 数组）
        #[arg(long)]
        characters: Option<PathBuf>,
    },
    /// 导出为 Final Draft XML
    FdxExport { input: PathBuf },
    /// 从 Final Draft XML 导入为 Fountain 文本
    FdxImport { input: PathBuf },
}

fn read_json_list<T: serde::de::DeserializeOwned>(path: Option<&Path>) -> FountainResult<Vec<T>> {
    match path {
        Some(path) => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        None => Ok(Vec::new()),
    }
}

async fn run(cli: Cli) -> FountainResult<i32> {
    let conf = match &cli.config {
        Some(path) => Conf::load(path)?,
        None => Conf::default(),
    };
    let parser = FountainParser::with_config(conf.clone());

    match cli.command {
        Command::Parse { input } => {
            let screenplay = parser.parse(&fs::read_to_string(input)?);
            println!("{}", serde_json::to_string_pretty(&screenplay)?);
        }
        Command::Fmt { input, write } => {
            let formatted = serialize(&parser.parse(&fs::read_to_string(&input)?));
            if write {
                fs::write(&input, formatted)?;
                info!(path:? = input; "已写回");
            } else {
                print!("{}", formatted);
            }
        }
        Command::Check { input, json } => {
            let screenplay = parser.parse(&fs::read_to_string(input)?);
            let issues = validate_with(&screenplay, &conf);
            if json {
                println!("{}", serde_json::to_string_pretty(&issues)?);
            } else {
                for issue in &issues {
                    println!("{}: {} [{}] {}", issue.line, issue.severity, issue.rule, issue.message);
                }
            }
            if !is_valid(&issues) {
                return Ok(1);
            }
        }
        Command::Stats { input } => {
            let screenplay = parser.parse(&fs::read_to_string(input)?);
            println!("{}", serde_json::to_string_pretty(&analyze_with(&screenplay, &conf))?);
        }
        Command::Diff { revisions } => {
            let texts = revisions
                .iter()
                .map(fs::read_to_string)
                .collect::<Result<Vec<_>, _>>()?;
            for patch in api::compute_patches(texts, Some(conf)).await? {
                match patch {
                    Some(patch) => println!("{}", patch.to_json_line()?),
                    None => println!("null"),
                }
            }
        }
        Command::Apply { base, patch } => {
            let patch = Patch::from_json_line(&fs::read_to_string(patch)?)?;
            print!("{}", apply_patch(&fs::read_to_string(base)?, &patch)?);
        }
        Command::Outline { input, existing, characters } => {
            let existing: Vec<OutlineEntry> = read_json_list(existing.as_deref())?;
            let profiles: Vec<CharacterProfile> = read_json_list(characters.as_deref())?;
            let text = fs::read_to_string(input)?;
            let entries = api::reconcile_outline(text, existing, profiles, Some(conf)).await?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Command::FdxExport { input } => {
            print!("{}", export_fdx(&parser.parse(&fs::read_to_string(input)?)));
        }
        Command::FdxImport { input } => {
            print!("{}", import_fdx(&fs::read_to_string(input)?)?);
        }
    }

    Ok(0)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("无效的日志级别: {}，改用 warn", cli.log_level);
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(command:? = cli.command; "开始执行");

    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(err) => {
            error!(err:err; "执行失败");
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}
