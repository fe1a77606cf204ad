//! # Task 模块
//!
//! 可恢复的任务状态机。
//!
//! ## 设计说明
//!
//! 每个任务是显式的 {状态, 条件} 对，不依赖任何语言级的挂起/恢复语法糖：
//! 状态可检视、可序列化，中止时行为有定义。
//!
//! [`Task::step`] 是 (状态, 当前时刻, 输入) → (新状态, 是否完成) 的纯推进
//! 函数，由驱动循环每帧调用一次，没有任何阻塞语义。
//!
//! ## 完成判据
//!
//! - 时长等待：`now - start >= duration`（到点即完成，见 DESIGN.md 的
//!   边界取舍）。注册本身不是一次 step，因此 `duration <= 0` 也在注册的
//!   下一帧才完成，保证至少让出一帧
//! - 点击等待：首个门闩为真的帧完成
//! - 信号等待：首个携带匹配信号的帧完成，是任意外部工作
//!   （动画、语音等）的通用完成通道
//! - 组合等待：全部子任务完成后完成；子任务每帧至多推进一步，
//!   调度器顶层始终只看到一个任务

use serde::{Deserialize, Serialize};

use crate::input::{Frame, SignalId};

/// 可恢复任务
///
/// 判别式即挂起原因；完成的任务由调度器在同一 step 内清除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Task {
    /// 挂起等待计时器
    Wait {
        /// 注册时刻（秒）
        start: f64,
        /// 等待时长（秒）
        duration: f64,
    },

    /// 挂起等待点击
    Click,

    /// 挂起等待外部信号
    Signal {
        /// 信号标识符
        id: SignalId,
    },

    /// 组合等待：持有子任务，全部完成后完成
    All {
        /// 尚未完成的子任务
        children: Vec<Task>,
    },
}

impl Task {
    /// 创建时长等待任务
    pub fn wait(start: f64, duration: f64) -> Self {
        Self::Wait { start, duration }
    }

    /// 创建点击等待任务
    pub fn click() -> Self {
        Self::Click
    }

    /// 创建信号等待任务
    pub fn signal(id: impl Into<SignalId>) -> Self {
        Self::Signal { id: id.into() }
    }

    /// 创建组合等待任务
    pub fn all(children: Vec<Task>) -> Self {
        Self::All { children }
    }

    /// 推进一帧
    ///
    /// 返回 `true` 表示任务完成。完成的子任务从组合中移除，
    /// 未完成的保留状态等待下一帧。
    pub fn step(&mut self, frame: &Frame) -> bool {
        match self {
            Self::Wait { start, duration } => frame.now - *start >= *duration,
            Self::Click => frame.clicked,
            Self::Signal { id } => frame.has_signal(id),
            Self::All { children } => {
                children.retain_mut(|child| !child.step(frame));
                children.is_empty()
            }
        }
    }

    /// 任务（或其任一子任务）是否在等待点击
    ///
    /// 宿主据此决定是否采集点击输入。
    pub fn wants_click(&self) -> bool {
        match self {
            Self::Click => true,
            Self::All { children } => children.iter().any(Task::wants_click),
            _ => false,
        }
    }

    /// 收集任务（含子任务）等待中的信号标识符
    pub fn pending_signals(&self) -> Vec<SignalId> {
        match self {
            Self::Signal { id } => vec![id.clone()],
            Self::All { children } => children
                .iter()
                .flat_map(Task::pending_signals)
                .collect(),
            _ => Vec::new(),
        }
    }
}
