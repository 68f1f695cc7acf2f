use std::process::ExitCode;

use housescene::{App, Config, Error, VertexShaderOverrides, shader};

fn run() -> Result<(), Error> {
    let config = Config::parse(std::env::args().skip(1))?;

    // User-supplied shader files are read before any window or GPU work so
    // a missing file fails immediately.
    let overrides = VertexShaderOverrides {
        sail: config
            .sail_shader
            .as_ref()
            .map(|path| shader::load_shader_source("sail", path))
            .transpose()?,
        water: config
            .water_shader
            .as_ref()
            .map(|path| shader::load_shader_source("water", path))
            .transpose()?,
    };

    App::run(config, overrides)
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
