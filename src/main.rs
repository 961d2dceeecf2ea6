//! # magics — 命令行入口
//!
//! 本文件仅负责参数解析、日志初始化与结果输出。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use magics::{AppError, MagicService, settings};

#[derive(Debug, Parser)]
#[command(name = "magics", version, about = "可逆的图片/字节网格变换")]
struct Cli {
    /// 设置文件（JSON），缺失或损坏时使用默认设置
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 剥离透明度，输出 <id>.png 与 <id>.map
    Glass {
        image: PathBuf,
    },
    /// 按映射文件恢复透明度
    Clear {
        image: PathBuf,
        map: PathBuf,
        /// 输出路径（默认覆盖输入图片）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 拆分为 N 块碎片
    Puzzle {
        image: PathBuf,
        /// 碎片数量
        #[arg(short = 'n', long)]
        pieces: usize,
        /// 洗牌种子，相同种子得到相同碎片
        #[arg(long)]
        seed: Option<u64>,
    },
    /// 叠加碎片目录中的 1.png … N.png
    Assemble {
        dir: PathBuf,
        /// 输出路径（默认 <id>.png）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 将任意文件编码为 RGB 图片
    Rainbow {
        file: PathBuf,
        /// 输出路径（默认 <去掉扩展名的输入>.png）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 从彩虹图中还原原文件
    Extract {
        image: PathBuf,
        output: PathBuf,
    },
    /// 将当前生效的设置写出为 JSON 文件
    Config {
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let app_settings = cli
        .config
        .as_deref()
        .map(settings::load_settings_from_path)
        .unwrap_or_default();
    let service = MagicService::from_settings(&app_settings)?;

    match cli.command {
        Command::Glass { image } => {
            let out = service.glassify(&image)?;
            println!(
                "{} {} {} ({}ms)",
                out.id,
                out.image_path.display(),
                out.map_path.display(),
                out.elapsed.as_millis()
            );
        }
        Command::Clear { image, map, output } => {
            let path = service.clearify(&image, &map, output.as_deref())?;
            println!("{}", path.display());
        }
        Command::Puzzle { image, pieces, seed } => {
            let out = service.disassemble(&image, pieces, seed)?;
            println!(
                "{} {} ({} pieces, {}ms)",
                out.id,
                out.dir.display(),
                out.pieces.len(),
                out.elapsed.as_millis()
            );
        }
        Command::Assemble { dir, output } => {
            let out = service.assemble(&dir, output.as_deref())?;
            println!(
                "{} {} ({} pieces, {}ms)",
                out.id,
                out.path.display(),
                out.pieces,
                out.elapsed.as_millis()
            );
        }
        Command::Rainbow { file, output } => {
            let out = service.rainbow(&file, output.as_deref())?;
            let (w, h) = out.layout.aspect_ratio();
            println!(
                "{} {}x{} ({}:{}, {}ms)",
                out.path.display(),
                out.layout.width,
                out.layout.height,
                w,
                h,
                out.elapsed.as_millis()
            );
        }
        Command::Extract { image, output } => {
            let written = service.extract(&image, &output)?;
            println!("{} ({} bytes)", output.display(), written);
        }
        Command::Config { output } => {
            settings::save_settings_to_path(&output, &app_settings)?;
            println!("{}", output.display());
        }
    }

    Ok(())
}
