mod backend;
mod cli;
mod commands;
mod help;
mod pipeline;
mod reorder;
mod resolver;
mod session;
mod x11;

use std::process;

use session::Session;
use x11::X11Backend;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        help::print_help();
        process::exit(-2);
    }

    let backend = match X11Backend::connect() {
        Ok(backend) => backend,
        Err(err) => {
            eprintln!("vdeskctl: {err:#}");
            process::exit(-1);
        }
    };

    let mut session = Session::default();
    let code = pipeline::run(&args, &mut session, &backend);
    process::exit(code);
}
