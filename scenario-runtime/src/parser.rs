//! # Parser 模块
//!
//! 行分隔剧本文本的解析器（手写字符串解析，无 regex 依赖）。
//!
//! ## 语法
//!
//! 每行一条命令，`#` 开头为注释，空行忽略：
//!
//! ```text
//! bg <id>                  切换背景
//! fg on|off                前景可见性
//! show <id>                显示立绘
//! hide <id>                隐藏立绘
//! motion <model> <motion>  播放模型动作
//! wait <seconds>           等待指定秒数
//! waitclick                等待点击
//! waitsignal <id>          等待外部信号
//! waitall <spec>+          组合等待（spec = 秒数 | click | signal:<id>）
//! 角色名: 内容              对话（`: 内容` 为旁白）
//! ```
//!
//! 未知指令是致命的创作期错误，带 1 起始的行号报告。

use std::str::FromStr;

use crate::command::{Command, Motion, WaitSpec};
use crate::error::ParseError;
use crate::program::Program;

/// 解析剧本文本为程序
pub fn parse_program(id: &str, text: &str) -> Result<Program, ParseError> {
    let mut commands = Vec::new();

    for (line_idx, raw) in text.lines().enumerate() {
        let line_number = line_idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        commands.push(parse_line(line, line_number)?);
    }

    Ok(Program::new(id, commands))
}

/// 解析单行
fn parse_line(line: &str, line_number: usize) -> Result<Command, ParseError> {
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((kw, rest)) => (kw, rest.trim()),
        None => (line, ""),
    };

    match keyword {
        "bg" => Ok(Command::ChangeBackground {
            id: require_param(rest, "bg", "id", line_number)?.to_string(),
        }),

        "fg" => match require_param(rest, "fg", "on|off", line_number)? {
            "on" => Ok(Command::SetForeground { visible: true }),
            "off" => Ok(Command::SetForeground { visible: false }),
            other => Err(ParseError::InvalidParameter {
                line: line_number,
                param: "on|off".to_string(),
                message: format!("期望 on 或 off，得到 '{other}'"),
            }),
        },

        "show" => Ok(Command::ShowSprite {
            id: require_param(rest, "show", "id", line_number)?.to_string(),
        }),

        "hide" => Ok(Command::HideSprite {
            id: require_param(rest, "hide", "id", line_number)?.to_string(),
        }),

        "motion" => {
            let rest = require_param(rest, "motion", "model", line_number)?;
            let (model, motion) =
                rest.split_once(char::is_whitespace)
                    .ok_or_else(|| ParseError::MissingParameter {
                        line: line_number,
                        command: "motion".to_string(),
                        param: "motion".to_string(),
                    })?;
            let motion =
                Motion::from_str(motion.trim()).map_err(|message| ParseError::InvalidParameter {
                    line: line_number,
                    param: "motion".to_string(),
                    message,
                })?;
            Ok(Command::PlayMotion {
                model: model.to_string(),
                motion,
            })
        }

        "wait" => {
            let value = require_param(rest, "wait", "seconds", line_number)?;
            let seconds = value
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidParameter {
                    line: line_number,
                    param: "seconds".to_string(),
                    message: format!("'{value}' 不是有效的秒数"),
                })?;
            Ok(Command::Wait { seconds })
        }

        "waitclick" => Ok(Command::WaitClick),

        "waitsignal" => Ok(Command::WaitSignal {
            id: require_param(rest, "waitsignal", "id", line_number)?.to_string(),
        }),

        "waitall" => {
            let rest = require_param(rest, "waitall", "spec", line_number)?;
            let waits = rest
                .split_whitespace()
                .map(|spec| parse_wait_spec(spec, line_number))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Command::WaitAll { waits })
        }

        _ => parse_dialogue(line, keyword, line_number),
    }
}

/// 解析组合等待的子条件
fn parse_wait_spec(spec: &str, line_number: usize) -> Result<WaitSpec, ParseError> {
    if spec == "click" {
        return Ok(WaitSpec::Click);
    }
    if let Some(id) = spec.strip_prefix("signal:") {
        if id.is_empty() {
            return Err(ParseError::InvalidParameter {
                line: line_number,
                param: "spec".to_string(),
                message: "signal: 后缺少标识符".to_string(),
            });
        }
        return Ok(WaitSpec::Signal(id.to_string()));
    }
    spec.parse::<f64>()
        .map(WaitSpec::Duration)
        .map_err(|_| ParseError::InvalidParameter {
            line: line_number,
            param: "spec".to_string(),
            message: format!("'{spec}' 不是秒数、click 或 signal:<id>"),
        })
}

/// 解析对话行（`角色名: 内容` 或 `: 内容`）
fn parse_dialogue(line: &str, keyword: &str, line_number: usize) -> Result<Command, ParseError> {
    let Some((speaker, text)) = line.split_once(':') else {
        return Err(ParseError::UnknownCommand {
            line: line_number,
            command: keyword.to_string(),
        });
    };

    let speaker = speaker.trim();
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::InvalidLine {
            line: line_number,
            message: "对话内容为空".to_string(),
        });
    }

    Ok(Command::Dialogue {
        speaker: (!speaker.is_empty()).then(|| speaker.to_string()),
        text: text.to_string(),
    })
}

/// 校验必需参数非空
fn require_param<'a>(
    rest: &'a str,
    command: &str,
    param: &str,
    line_number: usize,
) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingParameter {
            line: line_number,
            command: command.to_string(),
            param: param.to_string(),
        })
    } else {
        Ok(rest)
    }
}
