//! # Stage 模块
//!
//! 演出表面：背景、前景、立绘层、模型层、对话框。
//!
//! ## 设计说明
//!
//! 每个表面只持有自己的可见状态并暴露状态变更接口，不暴露渲染机制。
//! 渲染后端读取这些状态绘制画面；核心对怎么画一无所知。
//!
//! 立绘/模型以清单名册登记，引用未登记的标识符按创作期配置错误处理。

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::command::Motion;
use crate::error::RuntimeError;
use crate::manifest::ScenarioInfo;

/// 背景表面
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Background {
    current: Option<String>,
}

impl Background {
    /// 恢复初始状态（无背景，宿主渲染为黑）
    pub fn initialize(&mut self) {
        self.current = None;
    }

    /// 切换背景
    pub fn set(&mut self, id: impl Into<String>) {
        self.current = Some(id.into());
    }

    /// 当前背景标识符
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

/// 前景表面
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Foreground {
    visible: bool,
}

impl Foreground {
    /// 恢复初始状态（隐藏）
    pub fn initialize(&mut self) {
        self.visible = false;
    }

    /// 设置可见性
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// 是否可见
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// 立绘层
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteLayer {
    roster: HashSet<String>,
    visible: HashSet<String>,
}

impl SpriteLayer {
    /// 按名册创建立绘层
    pub fn with_roster(roster: impl IntoIterator<Item = String>) -> Self {
        Self {
            roster: roster.into_iter().collect(),
            visible: HashSet::new(),
        }
    }

    /// 清空可见立绘
    pub fn initialize(&mut self) {
        self.visible.clear();
    }

    /// 显示立绘
    pub fn show(&mut self, id: &str) -> Result<(), RuntimeError> {
        if !self.roster.contains(id) {
            return Err(RuntimeError::UnknownSprite { id: id.to_string() });
        }
        self.visible.insert(id.to_string());
        Ok(())
    }

    /// 隐藏立绘
    pub fn hide(&mut self, id: &str) -> Result<(), RuntimeError> {
        if !self.roster.contains(id) {
            return Err(RuntimeError::UnknownSprite { id: id.to_string() });
        }
        self.visible.remove(id);
        Ok(())
    }

    /// 立绘是否可见
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }
}

/// 模型层
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelLayer {
    roster: HashSet<String>,
    motions: HashMap<String, Motion>,
}

impl ModelLayer {
    /// 按名册创建模型层
    pub fn with_roster(roster: impl IntoIterator<Item = String>) -> Self {
        Self {
            roster: roster.into_iter().collect(),
            motions: HashMap::new(),
        }
    }

    /// 清空动作状态
    pub fn initialize(&mut self) {
        self.motions.clear();
    }

    /// 播放模型动作
    pub fn play(&mut self, model: &str, motion: Motion) -> Result<(), RuntimeError> {
        if !self.roster.contains(model) {
            return Err(RuntimeError::UnknownModel {
                id: model.to_string(),
            });
        }
        self.motions.insert(model.to_string(), motion);
        Ok(())
    }

    /// 模型当前动作
    pub fn current_motion(&self, model: &str) -> Option<Motion> {
        self.motions.get(model).copied()
    }
}

/// 对话框
///
/// `revision` 在每次显示时递增，宿主据此检测内容变化，
/// 不需要事件通道。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueBox {
    speaker: Option<String>,
    text: String,
    revision: u64,
}

impl DialogueBox {
    /// 清空对话框
    pub fn initialize(&mut self) {
        self.speaker = None;
        self.text.clear();
        self.revision = 0;
    }

    /// 显示一行对话
    pub fn show(&mut self, speaker: Option<String>, text: impl Into<String>) {
        self.speaker = speaker;
        self.text = text.into();
        self.revision += 1;
    }

    /// 当前说话者
    pub fn speaker(&self) -> Option<&str> {
        self.speaker.as_deref()
    }

    /// 当前文本
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 内容版本号
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// 全部演出表面
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub background: Background,
    pub foreground: Foreground,
    pub sprites: SpriteLayer,
    pub models: ModelLayer,
    pub dialogue: DialogueBox,
}

impl Stage {
    /// 按清单名册创建舞台
    pub fn new(info: &ScenarioInfo) -> Self {
        let mut stage = Self {
            background: Background::default(),
            foreground: Foreground::default(),
            sprites: SpriteLayer::with_roster(info.sprites.iter().cloned()),
            models: ModelLayer::with_roster(info.models.iter().cloned()),
            dialogue: DialogueBox::default(),
        };
        stage.reset();
        stage
    }

    /// 将全部表面恢复初始状态（名册保留）
    pub fn reset(&mut self) {
        self.background.initialize();
        self.foreground.initialize();
        self.sprites.initialize();
        self.models.initialize();
        self.dialogue.initialize();
    }
}
