//! # Input 模块
//!
//! 输入门闩与每帧输入快照。
//!
//! ## 设计说明
//!
//! - 宿主随时调用 [`InputGate::click`] / [`InputGate::raise`] 记录输入
//! - 同一帧内的多次点击**合并**为"本帧是否有过点击"，不排队
//! - 每帧 [`InputGate::pop`] 恰好一次：读取并清空，产出 [`Frame`] 快照
//! - 核心只处理语义化输入，不直接处理鼠标/键盘事件

use serde::{Deserialize, Serialize};

/// 信号标识符
///
/// 用于 `waitsignal` 等待模式，允许外部系统（动画、音频等）触发继续执行。
pub type SignalId = String;

/// 每帧输入快照
///
/// 门闩在一帧开始时弹出的只读快照，任务与解释器本帧内读到的是同一份数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// 当前帧时刻（单调秒）
    pub now: f64,
    /// 本帧是否观察到点击
    pub clicked: bool,
    /// 本帧收到的外部信号
    pub signals: Vec<SignalId>,
}

impl Frame {
    /// 创建无输入的帧快照
    pub fn at(now: f64) -> Self {
        Self {
            now,
            clicked: false,
            signals: Vec::new(),
        }
    }

    /// 创建带点击的帧快照
    pub fn clicked_at(now: f64) -> Self {
        Self {
            now,
            clicked: true,
            signals: Vec::new(),
        }
    }

    /// 本帧是否收到指定信号
    pub fn has_signal(&self, id: &str) -> bool {
        self.signals.iter().any(|s| s == id)
    }
}

/// 输入门闩
///
/// 每帧一次写入（宿主）、一次读取（核心）的同步纪律就是全部同步机制，
/// 不需要锁。
#[derive(Debug, Default)]
pub struct InputGate {
    clicked: bool,
    signals: Vec<SignalId>,
}

impl InputGate {
    /// 创建新的门闩
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次点击（同帧内合并）
    pub fn click(&mut self) {
        self.clicked = true;
    }

    /// 记录一个外部信号（同帧内去重）
    pub fn raise(&mut self, id: impl Into<SignalId>) {
        let id = id.into();
        if !self.signals.contains(&id) {
            self.signals.push(id);
        }
    }

    /// 弹出本帧快照并清空门闩
    ///
    /// 读取后清除语义，每帧至多调用一次。
    pub fn pop(&mut self, now: f64) -> Frame {
        Frame {
            now,
            clicked: std::mem::take(&mut self.clicked),
            signals: std::mem::take(&mut self.signals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_coalesced() {
        let mut gate = InputGate::new();
        gate.click();
        gate.click();

        let frame = gate.pop(1.0);
        assert!(frame.clicked);

        // 弹出后清空
        let frame = gate.pop(2.0);
        assert!(!frame.clicked);
    }

    #[test]
    fn test_signal_dedup() {
        let mut gate = InputGate::new();
        gate.raise("anim_done");
        gate.raise("anim_done");
        gate.raise("voice_done");

        let frame = gate.pop(1.0);
        assert_eq!(frame.signals.len(), 2);
        assert!(frame.has_signal("anim_done"));
        assert!(frame.has_signal("voice_done"));
        assert!(!frame.has_signal("other"));

        let frame = gate.pop(2.0);
        assert!(frame.signals.is_empty());
    }

    #[test]
    fn test_frame_helpers() {
        let frame = Frame::at(3.5);
        assert_eq!(frame.now, 3.5);
        assert!(!frame.clicked);

        let frame = Frame::clicked_at(4.0);
        assert!(frame.clicked);
    }
}
