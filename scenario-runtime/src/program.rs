//! # Program 模块
//!
//! 剧本程序：有序命令序列加一个游标。
//!
//! ## 不变量
//!
//! - 游标在一次加载内单调不减，且仅通过 [`Program::next`] 前进
//! - 游标范围 `[0, len]`，等于 `len` 即"已耗尽"
//! - 命令加载后不可变；下次加载整体替换程序

use serde::{Deserialize, Serialize};

use crate::command::Command;

/// 剧本程序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// 剧本标识符
    pub id: String,
    /// 命令列表
    commands: Vec<Command>,
    /// 下一条命令的索引
    cursor: usize,
}

impl Program {
    /// 创建新程序，游标位于开头
    pub fn new(id: impl Into<String>, commands: Vec<Command>) -> Self {
        Self {
            id: id.into(),
            commands,
            cursor: 0,
        }
    }

    /// 取出下一条命令并前进游标
    ///
    /// 程序耗尽时返回 `None`，游标不再移动。
    pub fn next(&mut self) -> Option<Command> {
        let command = self.commands.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(command)
    }

    /// 查看下一条命令，不移动游标
    pub fn peek(&self) -> Option<&Command> {
        self.commands.get(self.cursor)
    }

    /// 是否还有未执行的命令
    pub fn has_remaining(&self) -> bool {
        self.cursor < self.commands.len()
    }

    /// 当前游标
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 命令数量
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// 是否为空程序
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
