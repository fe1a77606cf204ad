//! # Scheduler 模块
//!
//! 协作式任务调度器：至多一个活动任务。
//!
//! ## 核心不变量
//!
//! `is_busy()` 为真当且仅当存在未完成的活动任务。这条不变量让解释器可以
//! 本地推理（"不忙即可安全执行下一条命令"），不需要一般化的并发模型。
//! 组合/顺序任务表示为单个外层 [`Task`] 内部推进子状态，调度器本身
//! 永远只看到一个任务。

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::RuntimeError;
use crate::input::Frame;
use crate::task::Task;

/// 任务调度器
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Scheduler {
    /// 当前活动任务
    active: Option<Task>,
}

impl Scheduler {
    /// 创建空闲调度器
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册新任务
    ///
    /// 已有活动任务时返回 [`RuntimeError::TaskAlreadyActive`]：
    /// 这是调度不变量的违反，调用方必须让它大声失败。
    pub fn register(&mut self, task: Task) -> Result<(), RuntimeError> {
        if self.active.is_some() {
            return Err(RuntimeError::TaskAlreadyActive);
        }
        trace!(?task, "注册任务");
        self.active = Some(task);
        Ok(())
    }

    /// 推进活动任务一帧
    ///
    /// 每帧至多调用一次。任务完成时在同一 step 内清除活动任务与忙标志，
    /// 不占用额外的空闲帧。空闲时调用是安全的 no-op。
    pub fn step(&mut self, frame: &Frame) {
        if let Some(task) = self.active.as_mut() {
            if task.step(frame) {
                debug!(now = frame.now, "任务完成");
                self.active = None;
            }
        }
    }

    /// 是否有未完成的活动任务
    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    /// 查看活动任务（宿主据此决定采集哪种输入）
    pub fn active(&self) -> Option<&Task> {
        self.active.as_ref()
    }

    /// 丢弃活动任务
    ///
    /// 用于剧本中止：先清空调度器状态，再拆除演出表面。
    pub fn clear(&mut self) {
        if self.active.take().is_some() {
            debug!("丢弃活动任务");
        }
    }
}
