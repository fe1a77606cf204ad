//! # Command 模块
//!
//! 定义剧本程序中的全部命令。
//!
//! ## 设计原则
//!
//! - **声明式**：Command 描述"做什么"，不描述"怎么做"
//! - **不可变**：解析阶段创建后不再修改，由 [`Program`](crate::program::Program) 持有
//! - **引擎无关**：不包含任何渲染后端的类型

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::input::SignalId;

/// 模型动作
///
/// 模型管理器支持的动作枚举，剧本通过 `motion` 指令触发。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Motion {
    /// 待机
    Idle,
    /// 说话
    Talk,
    /// 喜悦
    Joy,
    /// 悲伤
    Sad,
    /// 惊讶
    Surprise,
}

impl FromStr for Motion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "talk" => Ok(Self::Talk),
            "joy" => Ok(Self::Joy),
            "sad" => Ok(Self::Sad),
            "surprise" => Ok(Self::Surprise),
            other => Err(format!("未知的动作 '{other}'")),
        }
    }
}

/// 组合等待的子条件
///
/// `waitall` 命令的组成单元，全部满足后命令才算完成。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WaitSpec {
    /// 等待指定秒数
    Duration(f64),
    /// 等待用户点击
    Click,
    /// 等待外部信号
    Signal(SignalId),
}

/// 剧本命令
///
/// 表示剧本中的一个执行单元。前五种是纯状态设置命令（同帧完成），
/// 后四种会向调度器注册阻塞任务。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// 切换背景
    ///
    /// 对应 `bg <id>` 语法
    ChangeBackground {
        /// 背景标识符
        id: String,
    },

    /// 设置前景可见性
    ///
    /// 对应 `fg on` / `fg off` 语法
    SetForeground {
        /// 是否可见
        visible: bool,
    },

    /// 显示立绘
    ///
    /// 对应 `show <id>` 语法
    ShowSprite {
        /// 立绘标识符（必须在清单中登记）
        id: String,
    },

    /// 隐藏立绘
    ///
    /// 对应 `hide <id>` 语法
    HideSprite {
        /// 立绘标识符
        id: String,
    },

    /// 播放模型动作
    ///
    /// 对应 `motion <model> <motion>` 语法
    PlayMotion {
        /// 模型标识符（必须在清单中登记）
        model: String,
        /// 动作
        motion: Motion,
    },

    /// 显示对话
    ///
    /// 对应 `角色名: 内容` 语法（`: 内容` 表示旁白）。
    /// 对话本身同帧完成，节奏由显式的 `waitclick` 控制。
    Dialogue {
        /// 说话者名称（None 表示旁白）
        speaker: Option<String>,
        /// 对话内容
        text: String,
    },

    /// 等待指定秒数
    ///
    /// 对应 `wait <seconds>` 语法
    Wait {
        /// 等待时长（秒）。非正值也至少让出一帧
        seconds: f64,
    },

    /// 等待用户点击
    ///
    /// 对应 `waitclick` 语法
    WaitClick,

    /// 等待外部信号
    ///
    /// 对应 `waitsignal <id>` 语法，由宿主在动画/音频等外部工作完成时触发
    WaitSignal {
        /// 信号标识符
        id: SignalId,
    },

    /// 组合等待
    ///
    /// 对应 `waitall <spec>+` 语法，全部子条件完成后才继续
    WaitAll {
        /// 子条件列表
        waits: Vec<WaitSpec>,
    },
}

impl Command {
    /// 判断命令是否会注册阻塞任务
    ///
    /// 驱动循环据此区分"同帧排空"与"本帧到此为止"。
    pub fn causes_wait(&self) -> bool {
        matches!(
            self,
            Self::Wait { .. } | Self::WaitClick | Self::WaitSignal { .. } | Self::WaitAll { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_causes_wait() {
        assert!(Command::Wait { seconds: 1.0 }.causes_wait());
        assert!(Command::WaitClick.causes_wait());
        assert!(
            Command::WaitSignal {
                id: "anim_done".to_string()
            }
            .causes_wait()
        );
        assert!(Command::WaitAll { waits: vec![] }.causes_wait());

        assert!(
            !Command::ChangeBackground {
                id: "room".to_string()
            }
            .causes_wait()
        );
        assert!(
            !Command::Dialogue {
                speaker: None,
                text: "你好".to_string()
            }
            .causes_wait()
        );
    }

    #[test]
    fn test_motion_from_str() {
        assert_eq!("idle".parse::<Motion>(), Ok(Motion::Idle));
        assert_eq!("talk".parse::<Motion>(), Ok(Motion::Talk));
        assert!("dance".parse::<Motion>().is_err());
    }

    #[test]
    fn test_command_serialization() {
        let cmd = Command::PlayMotion {
            model: "hero".to_string(),
            motion: Motion::Joy,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, deserialized);
    }
}
