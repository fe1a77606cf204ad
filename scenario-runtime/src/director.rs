//! # Director 模块
//!
//! 顶层驱动：持有调度器、解释器、程序与舞台，每帧推进一次。
//!
//! ## 执行模型
//!
//! ```text
//! 每帧:
//!   弹出输入门闩 → Frame 快照
//!   Loading: 加载剧本、安装程序、转入 Running，本帧结束
//!            （即使加载瞬时完成也让出一帧，给宿主呈现加载画面）
//!   Running: 若忙则 step 一次；若仍忙本帧结束；
//!            否则反复执行下一条命令，直到程序耗尽或注册了阻塞任务
//! ```
//!
//! 排空循环绝不在调度器忙时调用 `execute_next`（至多一个任务的不变量），
//! 也绝不在有活动任务的帧里跳过 `step`（否则阻塞任务永远不会推进）。
//!
//! ## 设计说明
//!
//! - 阶段是显式枚举，单个 match 分派，合法转换可审计
//! - Director 是显式构造、显式传递的上下文对象，没有全局单例；
//!   需要它服务的组件在构造时拿到引用

use tracing::debug;

use crate::error::ScenarioResult;
use crate::input::{InputGate, SignalId};
use crate::interpreter::{Interpreter, Outcome};
use crate::manifest::ScenarioInfo;
use crate::program::Program;
use crate::scheduler::Scheduler;
use crate::stage::Stage;
use crate::task::Task;

/// 驱动阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 加载中（至少占一帧）
    Loading,
    /// 运行中
    Running,
}

/// 剧本加载边界
///
/// 核心不接触存储；宿主实现此 trait 提供解析好的程序。
pub trait ScenarioLoader {
    /// 按名称加载剧本程序
    fn load(&mut self, name: &str) -> ScenarioResult<Program>;
}

/// 顶层驱动
pub struct Director {
    phase: Phase,
    /// 待加载的剧本名
    pending: Option<String>,
    loader: Box<dyn ScenarioLoader>,
    scheduler: Scheduler,
    interpreter: Interpreter,
    program: Option<Program>,
    stage: Stage,
    gate: InputGate,
}

impl Director {
    /// 创建驱动，入口剧本取清单的默认值
    pub fn new(info: &ScenarioInfo, loader: Box<dyn ScenarioLoader>) -> Self {
        Self {
            phase: Phase::Loading,
            pending: Some(info.default_scenario.clone()),
            loader,
            scheduler: Scheduler::new(),
            interpreter: Interpreter::new(),
            program: None,
            stage: Stage::new(info),
            gate: InputGate::new(),
        }
    }

    /// 切换到指定剧本
    ///
    /// 先丢弃调度器状态再进入加载阶段；旧任务不会挂在被替换的程序上。
    pub fn start_scenario(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!(%name, "切换剧本");
        self.scheduler.clear();
        self.program = None;
        self.pending = Some(name);
        self.phase = Phase::Loading;
    }

    /// 记录一次点击（同帧合并）
    pub fn notify_click(&mut self) {
        self.gate.click();
    }

    /// 记录一个外部信号
    pub fn notify_signal(&mut self, id: impl Into<SignalId>) {
        self.gate.raise(id);
    }

    /// 推进一帧
    ///
    /// `now` 由宿主的帧时钟提供，每帧恰好调用一次。
    pub fn tick(&mut self, now: f64) -> ScenarioResult<()> {
        let frame = self.gate.pop(now);

        match self.phase {
            Phase::Loading => {
                if let Some(name) = self.pending.take() {
                    debug!(%name, "加载剧本");
                    let program = self.loader.load(&name)?;
                    self.stage.reset();
                    self.program = Some(program);
                }
                self.phase = Phase::Running;
                Ok(())
            }

            Phase::Running => {
                if self.scheduler.is_busy() {
                    self.scheduler.step(&frame);
                }
                // 任务在本帧完成时继续排空，不占额外空闲帧
                if self.scheduler.is_busy() {
                    return Ok(());
                }

                let Some(program) = self.program.as_mut() else {
                    return Ok(());
                };
                while program.has_remaining() {
                    match self.interpreter.execute_next(
                        program,
                        &mut self.stage,
                        &mut self.scheduler,
                        &frame,
                    )? {
                        Outcome::Completed => continue,
                        Outcome::Registered => break,
                    }
                }
                Ok(())
            }
        }
    }

    /// 剧本是否播放完毕（程序耗尽且调度器空闲）
    ///
    /// 宿主观察此信号触发场景切换。
    pub fn is_finished(&self) -> bool {
        !self.scheduler.is_busy()
            && self
                .program
                .as_ref()
                .is_some_and(|p| !p.has_remaining())
    }

    /// 中止播放
    ///
    /// 先丢弃活动任务与调度器状态，再重置演出表面。
    pub fn stop(&mut self) {
        self.scheduler.clear();
        self.program = None;
        self.pending = None;
        self.stage.reset();
        self.phase = Phase::Loading;
    }

    /// 当前阶段
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 演出表面（宿主渲染用）
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// 当前活动任务（宿主据此决定采集哪种输入）
    pub fn waiting_on(&self) -> Option<&Task> {
        self.scheduler.active()
    }
}
