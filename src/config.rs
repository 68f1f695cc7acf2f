//! Command-line configuration.
//!
//! Every switch takes exactly one argument:
//!
//! | Switch   | Argument        | Effect                                    |
//! |----------|-----------------|-------------------------------------------|
//! | `-w`     | integer         | window width in pixels (default 800)      |
//! | `-h`     | integer         | window height in pixels (default 800)     |
//! | `-dir`   | integer degrees | base wind direction (default 0)           |
//! | `-sail`  | path            | user-supplied sail vertex shader (WGSL)   |
//! | `-water` | path            | user-supplied water vertex shader (WGSL)  |

use std::path::PathBuf;

use crate::error::Error;
use crate::math::deg_to_rad;

/// Parsed program configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub width: i32,
    pub height: i32,
    /// Base wind direction in radians, seeded from `-dir` degrees.
    pub base_dir: f32,
    pub sail_shader: Option<PathBuf>,
    pub water_shader: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            base_dir: 0.0,
            sail_shader: None,
            water_shader: None,
        }
    }
}

impl Config {
    /// Parses the argument list (without the program name).
    pub fn parse<I, S>(args: I) -> Result<Config, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            if !arg.starts_with('-') {
                return Err(Error::UnexpectedArgument(arg));
            }
            let value = args.next().ok_or_else(|| Error::MissingValue(arg.clone()))?;
            match arg.as_str() {
                "-w" => config.width = atoi(&value),
                "-h" => config.height = atoi(&value),
                "-dir" => config.base_dir = deg_to_rad(atoi(&value) as f32),
                "-sail" => config.sail_shader = Some(PathBuf::from(value)),
                "-water" => config.water_shader = Some(PathBuf::from(value)),
                _ => return Err(Error::UnknownSwitch(arg)),
            }
        }
        Ok(config)
    }
}

/// Leading-digits integer parse with C `atoi` semantics: an optional sign
/// followed by digits; anything else (or overflow) yields 0.
fn atoi(s: &str) -> i32 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        value = value * 10 + d as i64;
        if value > i32::MAX as i64 + 1 {
            break;
        }
    }
    (sign * value).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::parse(Vec::<String>::new()).unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 800);
        assert_eq!(config.base_dir, 0.0);
        assert!(config.sail_shader.is_none());
        assert!(config.water_shader.is_none());
    }

    #[test]
    fn width_and_height() {
        let config = Config::parse(["-w", "400", "-h", "600"]).unwrap();
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 600);
    }

    #[test]
    fn base_direction_in_radians() {
        let config = Config::parse(["-dir", "90"]).unwrap();
        assert!((config.base_dir - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn shader_paths() {
        let config = Config::parse(["-sail", "sail.wgsl", "-water", "water.wgsl"]).unwrap();
        assert_eq!(config.sail_shader.as_deref(), Some("sail.wgsl".as_ref()));
        assert_eq!(config.water_shader.as_deref(), Some("water.wgsl".as_ref()));
    }

    #[test]
    fn unknown_switch_exits_7() {
        let err = Config::parse(["-foo", "bar"]).unwrap_err();
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn positional_argument_exits_17() {
        let err = Config::parse(["stray"]).unwrap_err();
        assert_eq!(err.exit_code(), 17);
    }

    #[test]
    fn switch_without_value_exits_7() {
        let err = Config::parse(["-w"]).unwrap_err();
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn atoi_semantics() {
        assert_eq!(atoi("42"), 42);
        assert_eq!(atoi("-13"), -13);
        assert_eq!(atoi("12px"), 12);
        assert_eq!(atoi("abc"), 0);
        assert_eq!(atoi(""), 0);
    }
}
