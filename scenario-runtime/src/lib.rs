//! # Scenario Runtime
//!
//! 视觉小说演出引擎的核心运行时库。
//!
//! ## 架构概述
//!
//! `scenario-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 单线程、协作式、帧同步：宿主渲染循环每帧推进一次时钟并调用
//! [`Director::tick`]，核心在其中完成调度与命令执行。
//!
//! ```text
//! Host                               Runtime
//!   │  notify_click / notify_signal    │
//!   │─────────────────────────────────►│
//!   │  tick(now)                       │
//!   │─────────────────────────────────►│  step 活动任务 / 排空就绪命令
//!   │  stage() / waiting_on()          │
//!   │◄─────────────────────────────────│
//! ```
//!
//! ## 核心不变量
//!
//! - 调度器至多持有一个活动任务；命令严格按程序顺序执行
//! - 挂起只发生在任务 `step` 返回未完成处，以及加载→运行的边界
//! - 输入门闩每帧一写一读，同帧多次点击合并
//!
//! ## 模块结构
//!
//! - [`command`]：剧本命令定义
//! - [`program`]：命令序列与游标
//! - [`task`]：可恢复任务状态机
//! - [`scheduler`]：协作式调度器
//! - [`interpreter`]：命令分派
//! - [`stage`]：演出表面状态
//! - [`director`]：顶层驱动与阶段机
//! - [`clock`] / [`input`]：帧时钟与输入门闩
//! - [`manifest`]：剧本清单
//! - [`parser`]：剧本文本解析
//! - [`error`]：错误类型定义

pub mod clock;
pub mod command;
pub mod director;
pub mod error;
pub mod input;
pub mod interpreter;
pub mod manifest;
pub mod parser;
pub mod program;
pub mod scheduler;
pub mod stage;
pub mod task;

// 重导出核心类型
pub use clock::FrameClock;
pub use command::{Command, Motion, WaitSpec};
pub use director::{Director, Phase, ScenarioLoader};
pub use error::{ParseError, RuntimeError, ScenarioError, ScenarioResult};
pub use input::{Frame, InputGate, SignalId};
pub use interpreter::{Interpreter, Outcome};
pub use manifest::ScenarioInfo;
pub use parser::parse_program;
pub use program::Program;
pub use scheduler::Scheduler;
pub use stage::Stage;
pub use task::Task;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // 验证所有公共类型都可以正常使用
        let _cmd = Command::Dialogue {
            speaker: Some("Test".to_string()),
            text: "Hello".to_string(),
        };

        let _task = Task::click();

        let _frame = Frame::at(0.0);

        let _scheduler = Scheduler::new();
    }
}
