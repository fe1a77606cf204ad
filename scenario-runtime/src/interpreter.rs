//! # Interpreter 模块
//!
//! 剧本解释器：取出下一条命令，分派到演出表面或注册阻塞任务。
//!
//! ## 职责
//!
//! - 读取 [`Program`] 的下一条命令并前进游标
//! - 纯状态设置命令直接改写 [`Stage`]，同帧完成
//! - 等待类命令向 [`Scheduler`] 注册恰好一个任务
//! - 以 [`Outcome`] 告知驱动循环能否继续排空
//!
//! 同步/注册的区分是"一帧内排空所有就绪命令、在第一条阻塞命令处停下"
//! 的前提：对话必须在帧结束前写入表面，立绘切换等非阻塞命令不额外耗帧。

use tracing::trace;

use crate::command::{Command, WaitSpec};
use crate::error::RuntimeError;
use crate::input::Frame;
use crate::program::Program;
use crate::scheduler::Scheduler;
use crate::stage::Stage;
use crate::task::Task;

/// 单条命令的执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 同帧完成，可以继续取下一条命令
    Completed,
    /// 已注册阻塞任务，本帧到此为止
    Registered,
}

/// 剧本解释器
pub struct Interpreter;

impl Interpreter {
    /// 创建新的解释器
    pub fn new() -> Self {
        Self
    }

    /// 程序是否还有未执行的命令
    pub fn has_remaining(&self, program: &Program) -> bool {
        program.has_remaining()
    }

    /// 执行下一条命令
    ///
    /// # 前置条件
    ///
    /// - 调度器空闲（违反返回 [`RuntimeError::TaskAlreadyActive`]）
    /// - 程序未耗尽（违反返回 [`RuntimeError::ProgramExhausted`]）
    pub fn execute_next(
        &mut self,
        program: &mut Program,
        stage: &mut Stage,
        scheduler: &mut Scheduler,
        frame: &Frame,
    ) -> Result<Outcome, RuntimeError> {
        if scheduler.is_busy() {
            return Err(RuntimeError::TaskAlreadyActive);
        }

        let command = program.next().ok_or(RuntimeError::ProgramExhausted)?;
        trace!(cursor = program.cursor(), ?command, "执行命令");

        match command {
            Command::ChangeBackground { id } => {
                stage.background.set(id);
                Ok(Outcome::Completed)
            }

            Command::SetForeground { visible } => {
                stage.foreground.set_visible(visible);
                Ok(Outcome::Completed)
            }

            Command::ShowSprite { id } => {
                stage.sprites.show(&id)?;
                Ok(Outcome::Completed)
            }

            Command::HideSprite { id } => {
                stage.sprites.hide(&id)?;
                Ok(Outcome::Completed)
            }

            Command::PlayMotion { model, motion } => {
                stage.models.play(&model, motion)?;
                Ok(Outcome::Completed)
            }

            Command::Dialogue { speaker, text } => {
                stage.dialogue.show(speaker, text);
                Ok(Outcome::Completed)
            }

            Command::Wait { seconds } => {
                scheduler.register(Task::wait(frame.now, seconds))?;
                Ok(Outcome::Registered)
            }

            Command::WaitClick => {
                scheduler.register(Task::click())?;
                Ok(Outcome::Registered)
            }

            Command::WaitSignal { id } => {
                scheduler.register(Task::signal(id))?;
                Ok(Outcome::Registered)
            }

            Command::WaitAll { waits } => {
                let children = waits
                    .into_iter()
                    .map(|spec| match spec {
                        WaitSpec::Duration(seconds) => Task::wait(frame.now, seconds),
                        WaitSpec::Click => Task::click(),
                        WaitSpec::Signal(id) => Task::signal(id),
                    })
                    .collect();
                scheduler.register(Task::all(children))?;
                Ok(Outcome::Registered)
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Motion;
    use crate::manifest::ScenarioInfo;

    fn stage() -> Stage {
        Stage::new(&ScenarioInfo {
            default_scenario: "test".to_string(),
            sprites: vec!["hero".to_string()],
            models: vec!["hero_l2d".to_string()],
        })
    }

    #[test]
    fn test_sync_commands_complete() {
        let mut interpreter = Interpreter::new();
        let mut stage = stage();
        let mut scheduler = Scheduler::new();
        let mut program = Program::new(
            "test",
            vec![
                Command::ChangeBackground {
                    id: "room".to_string(),
                },
                Command::ShowSprite {
                    id: "hero".to_string(),
                },
                Command::Dialogue {
                    speaker: Some("英雄".to_string()),
                    text: "你好".to_string(),
                },
            ],
        );
        let frame = Frame::at(0.0);

        for _ in 0..3 {
            let outcome = interpreter
                .execute_next(&mut program, &mut stage, &mut scheduler, &frame)
                .unwrap();
            assert_eq!(outcome, Outcome::Completed);
            assert!(!scheduler.is_busy());
        }

        assert_eq!(stage.background.current(), Some("room"));
        assert!(stage.sprites.is_visible("hero"));
        assert_eq!(stage.dialogue.text(), "你好");
    }

    #[test]
    fn test_wait_registers_task() {
        let mut interpreter = Interpreter::new();
        let mut stage = stage();
        let mut scheduler = Scheduler::new();
        let mut program = Program::new("test", vec![Command::Wait { seconds: 0.5 }]);

        let outcome = interpreter
            .execute_next(&mut program, &mut stage, &mut scheduler, &Frame::at(2.0))
            .unwrap();

        assert_eq!(outcome, Outcome::Registered);
        // 注册时刻取自当前帧
        assert_eq!(
            scheduler.active(),
            Some(&Task::wait(2.0, 0.5))
        );
    }

    #[test]
    fn test_waitall_builds_composite() {
        let mut interpreter = Interpreter::new();
        let mut stage = stage();
        let mut scheduler = Scheduler::new();
        let mut program = Program::new(
            "test",
            vec![Command::WaitAll {
                waits: vec![WaitSpec::Duration(1.0), WaitSpec::Click],
            }],
        );

        let outcome = interpreter
            .execute_next(&mut program, &mut stage, &mut scheduler, &Frame::at(3.0))
            .unwrap();

        assert_eq!(outcome, Outcome::Registered);
        assert_eq!(
            scheduler.active(),
            Some(&Task::all(vec![Task::wait(3.0, 1.0), Task::click()]))
        );
    }

    #[test]
    fn test_busy_precondition() {
        let mut interpreter = Interpreter::new();
        let mut stage = stage();
        let mut scheduler = Scheduler::new();
        let mut program = Program::new("test", vec![Command::WaitClick]);
        scheduler.register(Task::click()).unwrap();

        let err = interpreter
            .execute_next(&mut program, &mut stage, &mut scheduler, &Frame::at(0.0))
            .unwrap_err();
        assert_eq!(err, RuntimeError::TaskAlreadyActive);
        // 前置条件违反时游标不前进
        assert_eq!(program.cursor(), 0);
    }

    #[test]
    fn test_exhausted_precondition() {
        let mut interpreter = Interpreter::new();
        let mut stage = stage();
        let mut scheduler = Scheduler::new();
        let mut program = Program::new("test", vec![]);

        let err = interpreter
            .execute_next(&mut program, &mut stage, &mut scheduler, &Frame::at(0.0))
            .unwrap_err();
        assert_eq!(err, RuntimeError::ProgramExhausted);
    }

    #[test]
    fn test_unknown_target_is_fatal() {
        let mut interpreter = Interpreter::new();
        let mut stage = stage();
        let mut scheduler = Scheduler::new();
        let mut program = Program::new(
            "test",
            vec![
                Command::ShowSprite {
                    id: "ghost".to_string(),
                },
                Command::PlayMotion {
                    model: "nobody".to_string(),
                    motion: Motion::Idle,
                },
            ],
        );
        let frame = Frame::at(0.0);

        let err = interpreter
            .execute_next(&mut program, &mut stage, &mut scheduler, &frame)
            .unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownSprite { .. }));

        let err = interpreter
            .execute_next(&mut program, &mut stage, &mut scheduler, &frame)
            .unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownModel { .. }));
    }
}
