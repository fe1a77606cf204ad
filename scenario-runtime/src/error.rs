//! # Error 模块
//!
//! 定义 scenario-runtime 中使用的错误类型。
//!
//! ## 错误分类
//!
//! - [`ParseError`]：剧本文档错误（创作期 bug，必须大声失败）
//! - [`RuntimeError`]：运行期错误，包括调度不变量违反（核心自身的编程错误）
//! - 空闲调度器上的 `step()`、查询已耗尽的程序等属于安全 no-op，不是错误

use thiserror::Error;

/// 解析错误
///
/// 剧本文档的创作期错误，解析阶段立即暴露，不重试。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// 无效的行格式
    #[error("第 {line} 行：无效的格式 - {message}")]
    InvalidLine { line: usize, message: String },

    /// 未知指令
    #[error("第 {line} 行：未知指令 '{command}'")]
    UnknownCommand { line: usize, command: String },

    /// 缺少必需参数
    #[error("第 {line} 行：指令 '{command}' 缺少参数 '{param}'")]
    MissingParameter {
        line: usize,
        command: String,
        param: String,
    },

    /// 无效的参数值
    #[error("第 {line} 行：参数 '{param}' 的值无效 - {message}")]
    InvalidParameter {
        line: usize,
        param: String,
        message: String,
    },
}

/// 运行时错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// 已有任务在执行时注册新任务
    ///
    /// 这是调度不变量（至多一个活动任务）的违反，属于核心自身的编程错误。
    #[error("调度器已有活动任务，不能注册新任务")]
    TaskAlreadyActive,

    /// 程序已耗尽时仍请求执行下一条命令
    #[error("剧本程序已执行完毕")]
    ProgramExhausted,

    /// 引用了未登记的立绘
    #[error("立绘 '{id}' 未在清单中登记")]
    UnknownSprite { id: String },

    /// 引用了未登记的模型
    #[error("模型 '{id}' 未在清单中登记")]
    UnknownModel { id: String },
}

/// scenario-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),

    /// 运行时错误
    #[error("运行时错误: {0}")]
    Runtime(#[from] RuntimeError),

    /// 清单文档错误
    #[error("清单解析失败: {message}")]
    Manifest { message: String },

    /// 剧本加载失败（Loader 边界）
    #[error("剧本 '{name}' 加载失败: {message}")]
    Load { name: String, message: String },
}

/// Result 类型别名
pub type ScenarioResult<T> = Result<T, ScenarioError>;
