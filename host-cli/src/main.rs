//! 终端宿主：在命令行里驱动 scenario-runtime 的帧循环。
//!
//! 渲染退化为打印对话行；回车映射为点击门闩；等待中的外部信号
//! （动画、语音等在真实宿主里由对应子系统完成）在下一帧直接触发。

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use scenario_runtime::{
    Director, FrameClock, Program, ScenarioError, ScenarioInfo, ScenarioLoader, ScenarioResult,
    parse_program,
};

#[derive(Parser)]
#[command(about = "在终端中播放剧本")]
struct Args {
    /// 剧本目录（包含 <name>.scn 文件）
    scripts: PathBuf,

    /// 清单文件路径（默认 <scripts>/scenario_info.json）
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// 覆盖入口剧本名
    #[arg(long)]
    scenario: Option<String>,

    /// 帧率
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
}

/// 文件系统加载器：`<base>/<name>.scn`
struct FileLoader {
    base: PathBuf,
}

impl ScenarioLoader for FileLoader {
    fn load(&mut self, name: &str) -> ScenarioResult<Program> {
        let path = self.base.join(format!("{name}.scn"));
        let text = std::fs::read_to_string(&path).map_err(|e| ScenarioError::Load {
            name: name.to_string(),
            message: format!("{}: {e}", path.display()),
        })?;
        Ok(parse_program(name, &text)?)
    }
}

fn load_manifest(path: &Path) -> Result<ScenarioInfo> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("读取清单 {} 失败", path.display()))?;
    Ok(ScenarioInfo::from_json(&text)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let manifest_path = args
        .manifest
        .clone()
        .unwrap_or_else(|| args.scripts.join("scenario_info.json"));
    let info = load_manifest(&manifest_path)?;

    let loader = FileLoader {
        base: args.scripts.clone(),
    };
    let mut director = Director::new(&info, Box::new(loader));
    if let Some(name) = args.scenario {
        director.start_scenario(name);
    }

    let dt = 1.0 / args.fps;
    let mut clock = FrameClock::new();
    let mut last_revision = 0;
    let stdin = std::io::stdin();

    while !director.is_finished() {
        clock.advance(dt);
        director.tick(clock.now())?;

        let dialogue = &director.stage().dialogue;
        if dialogue.revision() != last_revision {
            last_revision = dialogue.revision();
            match dialogue.speaker() {
                Some(speaker) => println!("{speaker}: {}", dialogue.text()),
                None => println!("{}", dialogue.text()),
            }
        }

        let Some(task) = director.waiting_on() else {
            continue;
        };
        let pending_signals = task.pending_signals();
        let wants_click = task.wants_click();

        // 模拟外部子系统：等待中的信号下一帧即到达
        for id in pending_signals {
            debug!(%id, "触发外部信号");
            director.notify_signal(id);
        }

        if wants_click {
            print!("▼ ");
            std::io::stdout().flush()?;
            let mut line = String::new();
            stdin.lock().read_line(&mut line)?;
            director.notify_click();
        } else {
            std::thread::sleep(std::time::Duration::from_secs_f64(dt));
        }
    }

    debug!("剧本播放完毕");
    Ok(())
}
