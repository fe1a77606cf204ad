//! # Clock 模块
//!
//! 帧时钟：由宿主渲染循环持有，每帧推进一次，对其余组件只读。

use serde::{Deserialize, Serialize};

/// 帧时钟
///
/// 单调递增的秒数。宿主在核心 tick 之前调用 [`advance`](Self::advance)。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    now: f64,
}

impl FrameClock {
    /// 创建从 0 开始的时钟
    pub fn new() -> Self {
        Self::default()
    }

    /// 推进一帧
    ///
    /// 负的 dt 被钳制为 0，保证单调性。
    pub fn advance(&mut self, dt: f64) {
        self.now += dt.max(0.0);
    }

    /// 当前时刻（秒）
    pub fn now(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advance() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.now(), 0.0);

        clock.advance(1.0 / 60.0);
        clock.advance(1.0 / 60.0);
        assert!((clock.now() - 2.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_clock_monotonic() {
        let mut clock = FrameClock::new();
        clock.advance(0.5);
        clock.advance(-1.0);
        assert_eq!(clock.now(), 0.5);
    }
}
