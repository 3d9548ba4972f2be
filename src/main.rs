use std::env;
use std::error::Error;
use std::process;

use clap::{App, AppSettings, Arg, ArgGroup, ArgMatches, SubCommand};
use fnv::FnvHashMap;
use log::debug;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

use rush_hour_solver::board::Board;
use rush_hour_solver::config::Method;
use rush_hour_solver::fs::board_files;
use rush_hour_solver::heuristic::{feature_by_name, Heuristic};
use rush_hour_solver::solver::best_first::BestFirstSolver;
use rush_hour_solver::solver::distance_map::DistanceMap;
use rush_hour_solver::solver::equivalence::EquivalenceClass;
use rush_hour_solver::solver::iterative_deepening::IterativeDeepeningSolver;
use rush_hour_solver::solver::{create_solver, Solver};
use rush_hour_solver::LoadBoard;

fn main() {
    env_logger::init();

    let file = || Arg::with_name("file").required(true).help("board file");

    let app = App::new("rush-hour-solver")
        .version("0.1")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(SubCommand::with_name("print").about("print the board").arg(file()))
        .subcommand(
            SubCommand::with_name("solve")
                .about("solve the board (equivalence class by default)")
                .arg(Arg::with_name("bfs").long("bfs").help("breadth-first search"))
                .arg(Arg::with_name("ids").long("ids").help("iterative deepening"))
                .arg(Arg::with_name("equiv").long("equiv").help("equivalence class"))
                .arg(
                    Arg::with_name("best-first")
                        .long("best-first")
                        .help("best-first search guided by a heuristic"),
                )
                .group(ArgGroup::with_name("method").args(&["bfs", "ids", "equiv", "best-first"]))
                .arg(
                    Arg::with_name("max-depth")
                        .long("max-depth")
                        .takes_value(true)
                        .value_name("N")
                        .requires("ids")
                        .help("largest depth limit of iterative deepening"),
                )
                .arg(
                    Arg::with_name("features")
                        .long("features")
                        .takes_value(true)
                        .use_delimiter(true)
                        .requires("best-first")
                        .help("blocking, exit-distance, blocked-blockers"),
                )
                .arg(
                    Arg::with_name("weights")
                        .long("weights")
                        .takes_value(true)
                        .use_delimiter(true)
                        .requires("features")
                        .help("one weight per feature"),
                )
                .arg(
                    Arg::with_name("verbose")
                        .short("v")
                        .long("verbose")
                        .help("print statistics while searching"),
                )
                .arg(file()),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("print information about the board's equivalence class")
                .arg(file()),
        )
        .subcommand(
            SubCommand::with_name("check-unique")
                .about("find new boards that are in the same class as an old one")
                .arg(Arg::with_name("old").required(true))
                .arg(Arg::with_name("new").required(true)),
        )
        .subcommand(
            SubCommand::with_name("analyze")
                .about("label boards with their distance to a solution up to a depth")
                .arg(file())
                .arg(Arg::with_name("depth").required(true)),
        );

    #[cfg(feature = "graph")]
    let app = app.subcommand(
        SubCommand::with_name("graph")
            .about("write the state space of the board's class in graphviz format")
            .arg(file())
            .arg(Arg::with_name("out").required(true)),
    );

    let matches = app.get_matches();
    let result = match matches.subcommand() {
        ("print", Some(sub)) => print(sub),
        ("solve", Some(sub)) => solve(sub),
        ("info", Some(sub)) => info(sub),
        ("check-unique", Some(sub)) => check_unique(sub),
        ("analyze", Some(sub)) => analyze(sub),
        #[cfg(feature = "graph")]
        ("graph", Some(sub)) => graph(sub),
        _ => unreachable!("clap requires a subcommand"),
    };

    if let Err(err) = result {
        println!("{}", err);
        process::exit(1);
    }
}

fn load(path: &str) -> Board {
    path.load_board().unwrap_or_else(|err| {
        let current_dir = env::current_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        println!("Can't load board {} in {}: {}", path, current_dir, err);
        process::exit(1);
    })
}

fn file_arg<'a>(matches: &'a ArgMatches<'_>) -> &'a str {
    // required by clap
    matches.value_of("file").unwrap_or_default()
}

fn print(matches: &ArgMatches<'_>) -> Result<(), Box<dyn Error>> {
    print!("{}", load(file_arg(matches)));
    Ok(())
}

fn solve(matches: &ArgMatches<'_>) -> Result<(), Box<dyn Error>> {
    let path = file_arg(matches);
    let board = load(path);
    let verbose = matches.is_present("verbose");

    let mut solver: Box<dyn Solver> = if matches.is_present("bfs") {
        create_solver(Method::Bfs)
    } else if matches.is_present("ids") {
        match matches.value_of("max-depth") {
            Some(max_depth) => Box::new(IterativeDeepeningSolver::new(max_depth.parse()?)),
            None => create_solver(Method::Ids),
        }
    } else if matches.is_present("best-first") {
        match matches.values_of("features") {
            Some(names) => Box::new(BestFirstSolver::new(heuristic(names, matches.values_of("weights"))?)),
            None => create_solver(Method::BestFirst),
        }
    } else {
        create_solver(Method::Equivalence)
    };
    debug!("Using {:?}", solver);

    println!("Solving {} using {}...", path, solver.method());
    let solver_ok = solver.search(&board, verbose)?;
    if verbose {
        println!("{}", solver_ok.stats);
    }

    match solver_ok.solution {
        Some(ref solution) => {
            println!("Found solution:");
            println!("{}", solution.moves);
            println!("Moves: {}", solution.moves.move_cnt());
            println!("Visited states: {}", solution.visited_states.separated_string());
            println!();
            print!("{}", solution.solved_board);
        }
        None => {
            println!("No solution");
            println!("Visited states: {}", solver_ok.visited_states().separated_string());
        }
    }
    Ok(())
}

fn heuristic<'a, I>(names: I, weights: Option<I>) -> Result<Heuristic, Box<dyn Error>>
where
    I: Iterator<Item = &'a str>,
{
    let mut features = Vec::new();
    for name in names {
        features.push(feature_by_name(name).ok_or_else(|| format!("Unknown feature: {}", name))?);
    }

    let weights = match weights {
        Some(weights) => weights
            .map(|weight| weight.parse())
            .collect::<Result<Vec<f64>, _>>()?,
        None => vec![1.0; features.len()],
    };
    Ok(Heuristic::new(features, weights)?)
}

fn add_row<T: ToString>(table: &mut Table, name: &str, value: T) {
    table.add_row(Row::new(vec![Cell::new(name), Cell::new(&value.to_string())]));
}

fn depth_string(depth: Option<usize>) -> String {
    depth.map_or_else(|| "-".to_string(), |depth| depth.to_string())
}

fn info(matches: &ArgMatches<'_>) -> Result<(), Box<dyn Error>> {
    let board = load(file_arg(matches));
    let class = EquivalenceClass::new(&board)?;

    let mut table = Table::new();
    add_row(&mut table, "Class size", class.size().separated_string());
    add_row(&mut table, "Class depth", depth_string(class.max_depth()));
    add_row(&mut table, "Board depth", depth_string(class.depth_of_board(&board)?));
    add_row(&mut table, "Solutions", class.num_solutions().separated_string());
    add_row(&mut table, "Hash", format!("{:016x}", class.hash()));
    table.printstd();
    Ok(())
}

fn check_unique(matches: &ArgMatches<'_>) -> Result<(), Box<dyn Error>> {
    let old_dir = matches.value_of("old").unwrap_or_default();
    let new_dir = matches.value_of("new").unwrap_or_default();

    let mut old_hashes = FnvHashMap::default();
    for path in board_files(old_dir)? {
        let class = EquivalenceClass::new(&path.load_board()?)?;
        old_hashes.entry(class.hash()).or_insert(path);
    }

    let mut all_unique = true;
    for path in board_files(new_dir)? {
        let class = EquivalenceClass::new(&path.load_board()?)?;
        if let Some(old_path) = old_hashes.get(&class.hash()) {
            all_unique = false;
            println!(
                "{} is in the same equivalence class as {}",
                path.display(),
                old_path.display()
            );
        }
    }
    if all_unique {
        println!("all unique");
    }
    Ok(())
}

fn analyze(matches: &ArgMatches<'_>) -> Result<(), Box<dyn Error>> {
    let board = load(file_arg(matches));
    let to_depth: usize = matches.value_of("depth").unwrap_or_default().parse()?;

    let map = if board.is_solved() {
        DistanceMap::from_board(&board)
    } else {
        println!("Finding solutions...");
        DistanceMap::from_class(&EquivalenceClass::new(&board)?)
    };
    let mut map = match map {
        Some(map) => map,
        None => {
            println!("No solution");
            return Ok(());
        }
    };

    println!("Propagating to depth {}...", to_depth);
    map.propagate_depths(to_depth)?;

    let mut table = Table::new();
    add_row(&mut table, "Board depth", depth_string(map.depth_of_board(&board)));
    add_row(&mut table, "Map depth", map.max_depth());
    add_row(&mut table, "Map size", map.size().separated_string());
    add_row(&mut table, "Solutions", map.solutions().count().separated_string());
    add_row(&mut table, "Frontier size", map.frontier().count().separated_string());
    add_row(&mut table, "Exhausted", map.is_exhausted());
    table.printstd();

    println!("Farthest board:");
    print!("{}", map.farthest());
    Ok(())
}

#[cfg(feature = "graph")]
fn graph(matches: &ArgMatches<'_>) -> Result<(), Box<dyn Error>> {
    use rush_hour_solver::solver::dot_graph;

    let board = load(file_arg(matches));
    let out = matches.value_of("out").unwrap_or_default();
    let class = EquivalenceClass::new(&board)?;
    dot_graph::write_class(&class, out)?;
    println!("Wrote {} boards to {}", class.size(), out);
    Ok(())
}
