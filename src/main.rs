#[macro_use]
extern crate log;
#[macro_use]
extern crate prettytable;

use std::io::{self, Write};
use std::process;

use clap::{App, AppSettings, Arg, ArgGroup, ArgMatches};
use prettytable::format;
use prettytable::Table;
use separator::Separatable;

use sokoban_engine::config::{Config, Format};
use sokoban_engine::console;
use sokoban_engine::level::LevelState;
use sokoban_engine::moves::Moves;
use sokoban_engine::LoadLevel;

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-engine")
        .author("martin-t")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Play sokoban levels in the terminal")
        .after_help(
            "CONTROLS:\n    wasd or hjkl    move\n    z or u          undo\n    q               quit",
        )
        .setting(AppSettings::ColoredHelp)
        .arg(
            Arg::with_name("level")
                .short("l")
                .long("level")
                .takes_value(true)
                .default_value("1")
                .validator(validate_level)
                .help("number of the level to play"),
        )
        .arg(
            Arg::with_name("custom")
                .short("c")
                .long("custom")
                .help("print in custom format"),
        )
        .arg(
            Arg::with_name("xsb")
                .short("x")
                .long("xsb")
                .help("print in XSB format (default)"),
        )
        .group(ArgGroup::with_name("format").arg("custom").arg("xsb"))
        .arg(
            Arg::with_name("moves")
                .short("m")
                .long("moves")
                .takes_value(true)
                .help("play the given moves in LURD notation instead of reading stdin"),
        )
        .arg(
            Arg::with_name("replay")
                .short("r")
                .long("replay")
                .requires("moves")
                .help("print every push of the played moves"),
        )
        .arg(
            Arg::with_name("steps")
                .short("s")
                .long("steps")
                .requires("replay")
                .help("also print moves which are not pushes"),
        )
        .arg(
            Arg::with_name("levels")
                .required(true)
                .help("file with levels, each starting with a \"Level N\" line"),
        )
        .get_matches();

    let config = parse_config(&matches);

    let mut level = config
        .levels_path
        .load_level(config.level)
        .unwrap_or_else(|err| {
            println!(
                "Failed to load level {} from {}: {}",
                config.level, config.levels_path, err
            );
            process::exit(1);
        });

    match config.moves {
        Some(ref moves) => play_moves(&mut level, moves, &config),
        None => play_interactive(&mut level, config.format),
    }

    print_summary(&level);
}

fn parse_config(matches: &ArgMatches<'_>) -> Config {
    // both were validated by clap
    let levels_path = matches.value_of("levels").unwrap().to_owned();
    let level = matches.value_of("level").unwrap().parse().unwrap();

    let mut config = Config::new(levels_path, level);
    if matches.is_present("custom") {
        config.format = Format::Custom;
    }
    config.moves = matches.value_of("moves").map(str::to_owned);
    config.replay = matches.is_present("replay");
    config.include_steps = matches.is_present("steps");
    config
}

fn validate_level(level: String) -> Result<(), String> {
    match level.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(()),
        _ => Err(format!("Invalid level: {}", level)),
    }
}

fn play_moves(level: &mut LevelState, moves: &str, config: &Config) {
    let moves: Moves = moves.parse().unwrap_or_else(|err| {
        println!("Failed to parse moves: {}", err);
        process::exit(2);
    });

    let result = console::run_moves(level, &moves);
    if config.replay {
        print!("{}", level.replay(config.format, config.include_steps));
    } else {
        println!("{}", level.format(config.format));
    }
    if let Err(err) = result {
        println!("{}", err);
        process::exit(2);
    }
    if level.is_completed() {
        println!("Level completed");
    }
}

fn play_interactive(level: &mut LevelState, format: Format) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    match console::play(level, stdin.lock(), &mut stdout, format) {
        Ok(session) => debug!("{:?}", session),
        Err(err) => {
            error!("Failed to read commands: {}", err);
            process::exit(1);
        }
    }
    // separate the last frame from the summary
    writeln!(stdout).ok();
}

fn print_summary(level: &LevelState) {
    let history = level.history();
    let boxes = format!("{} / {}", level.boxes_on_docks(), level.box_count());
    let completed = if level.is_completed() { "yes" } else { "no" };

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.add_row(row!["Moves:", (history.move_cnt() as u64).separated_string()]);
    table.add_row(row!["Pushes:", (history.push_cnt() as u64).separated_string()]);
    table.add_row(row!["Boxes on docks:", boxes]);
    table.add_row(row!["Completed:", completed]);
    table.add_row(row!["History:", history]);
    table.printstd();
}
