// ==========================================
// UV DLP 切片配置 - 命令行入口
// ==========================================
// 用法:
//   uvdlp-slice-config show <profile> [--json]
//   uvdlp-slice-config init <profile>
//
// <profile> 为路径（含目录或扩展名）或默认配置目录下的配置档名称
// ==========================================

use anyhow::{bail, Context};
use std::path::Path;
use uvdlp_slice_config::app::{get_default_profile_dir, ProfileLocation};
use uvdlp_slice_config::{logging, SliceBuildConfig};

const USAGE: &str = "usage: uvdlp-slice-config <show|init> <profile> [--json]";

fn resolve_profile(arg: &str) -> ProfileLocation {
    let path = Path::new(arg);
    if path.components().count() > 1 || path.extension().is_some() {
        ProfileLocation::new(path)
    } else {
        ProfileLocation::named(&get_default_profile_dir(), arg)
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let command = args.next().context(USAGE)?;
    let profile = resolve_profile(&args.next().context(USAGE)?);
    let json = args.any(|a| a == "--json");

    tracing::debug!(
        "{} v{} - 配置档: {}",
        uvdlp_slice_config::APP_NAME,
        uvdlp_slice_config::VERSION,
        profile.config_path().display()
    );

    match command.as_str() {
        "show" => {
            let mut config = SliceBuildConfig::new();
            config
                .load_profile(&profile)
                .with_context(|| format!("无法加载配置档 {}", profile.config_path().display()))?;
            if json {
                println!("{}", config.to_snapshot_json()?);
            } else {
                print!("{}", config);
            }
        }
        "init" => {
            if let Some(parent) = profile.config_path().parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("无法创建目录 {}", parent.display()))?;
                }
            }
            SliceBuildConfig::new().save_profile(&profile)?;
            tracing::info!(
                "已写入默认配置档: {} (片段目录 {})",
                profile.config_path().display(),
                profile.gcode_dir().display()
            );
        }
        other => bail!("unknown command {:?}\n{}", other, USAGE),
    }

    Ok(())
}
