use autosweeper::{new_game, Game, GameConfig, GameError, Outcome, Position, Renderer, RunReport};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Plays Minesweeper by local deduction", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset: beginner, intermediate or expert
    #[arg(short, long, default_value = "expert", value_parser = parse_preset)]
    preset: GameConfig,

    /// Override the preset's row count
    #[arg(long)]
    rows: Option<usize>,

    /// Override the preset's column count
    #[arg(long)]
    cols: Option<usize>,

    /// Override the preset's mine count
    #[arg(short, long)]
    mines: Option<usize>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of games to play; game `i` uses `seed + i`
    #[arg(short, long, default_value_t = 1)]
    games: u64,

    /// Print the final board of every game
    #[arg(short, long)]
    board: bool,

    /// Print one JSON report per game
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig::new(
            self.rows.unwrap_or(self.preset.rows),
            self.cols.unwrap_or(self.preset.cols),
            self.mines.unwrap_or(self.preset.mines),
        )
    }
}

fn parse_preset(name: &str) -> Result<GameConfig, String> {
    GameConfig::preset(name).ok_or_else(|| format!("unknown preset '{name}'"))
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Game error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), GameError> {
    let config = args.config();
    config.validate()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "{}x{} board with {} mines, seed {}",
        config.rows,
        config.cols,
        config.mines,
        seed
    );

    let mut stats = AggregateStats::default();

    for i in 0..args.games {
        let game_seed = seed.wrapping_add(i);
        let grid = new_game(config.rows, config.cols, config.mines, game_seed)?;
        let mut game = Game::with_renderer(grid, game_seed, MoveLogger::default());
        let report = game.run()?;

        if args.json {
            let summary = GameSummary {
                seed: game_seed,
                config,
                report: &report,
            };
            match serde_json::to_string(&summary) {
                Ok(line) => println!("{}", line),
                Err(e) => log::error!("could not encode report: {}", e),
            }
        } else if args.games == 1 {
            print_report(&report, game_seed, game.renderer().moves);
        }

        if args.board {
            print!("{}", game.grid().render_text());
        }

        stats.record(report, config.safe_cells());
    }

    if args.games > 1 && !args.json {
        stats.print();
    }
    Ok(())
}

fn print_report(report: &RunReport, seed: u64, moves: usize) {
    match report.outcome {
        Outcome::Won => println!("Won (seed {})", seed),
        Outcome::Lost => println!(
            "Lost on {} (seed {})",
            report
                .triggered_mine
                .map_or_else(|| "?".to_string(), |p| p.to_string()),
            seed
        ),
    }
    println!(
        "{} moves, {} guesses, {} passes, {} flags",
        moves,
        report.guesses.len(),
        report.passes,
        report.flags_placed
    );
}

#[derive(Serialize)]
struct GameSummary<'a> {
    seed: u64,
    config: GameConfig,
    report: &'a RunReport,
}

/// Logs every move as it happens.
#[derive(Debug, Default)]
struct MoveLogger {
    moves: usize,
}

impl Renderer for MoveLogger {
    fn on_reveal(&mut self, cell: Position, number: u8) {
        self.moves += 1;
        log::trace!("reveal {} -> {}", cell, number);
    }

    fn on_flag(&mut self, cell: Position) {
        self.moves += 1;
        log::trace!("flag {}", cell);
    }

    fn on_detonate(&mut self, mines: &[Position], triggered: Position) {
        self.moves += 1;
        log::info!("detonated {} ({} mines on the board)", triggered, mines.len());
    }
}

#[derive(Debug, Default)]
struct AggregateStats {
    games: Vec<(RunReport, usize)>,
}

impl AggregateStats {
    fn record(&mut self, report: RunReport, safe_cells: usize) {
        self.games.push((report, safe_cells));
    }

    fn games_played(&self) -> usize {
        self.games.len()
    }

    fn success_rate(&self) -> f64 {
        if self.games_played() == 0 {
            return 0.0;
        }
        let won = self
            .games
            .iter()
            .filter(|(r, _)| r.outcome == Outcome::Won)
            .count();
        won as f64 / self.games_played() as f64 * 100.0
    }

    fn average_completion(&self) -> f64 {
        if self.games_played() == 0 {
            return 0.0;
        }
        let total: f64 = self
            .games
            .iter()
            .map(|(r, safe)| r.cells_revealed as f64 / *safe as f64 * 100.0)
            .sum();
        total / self.games_played() as f64
    }

    fn average_guesses(&self) -> f64 {
        if self.games_played() == 0 {
            return 0.0;
        }
        let total: usize = self.games.iter().map(|(r, _)| r.guesses.len()).sum();
        total as f64 / self.games_played() as f64
    }

    fn print(&self) {
        println!("Games played: {}", self.games_played());
        println!("Success rate: {:.1}%", self.success_rate());
        println!("Average board completion: {:.1}%", self.average_completion());
        println!("Average guesses per game: {:.2}", self.average_guesses());
    }
}
