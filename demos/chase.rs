//! Headless chase: an agent pursues a scripted pointer across a board with
//! random obstacles, while a wall is drawn mid-run.
//!
//! Run: cargo run --bin chase [config.json]
//!
//! Set `PURSUIT_LOG=debug` to see every replan.

use std::error::Error;
use std::fs;
use std::io::Write;

use pursuit_core::{BoardConfig, Cell};
use pursuit_demos::scatter::scatter_obstacles;
use pursuit_demos::{PointerEvent, Session};
use pursuit_paths::TickReport;
use rand::SeedableRng;

const TICK: f32 = 1.0 / 60.0;
const TICKS_PER_WAYPOINT: usize = 240;

fn load_config() -> Result<BoardConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(BoardConfig::default()),
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = load_config()?;
    let mut session = Session::new(&config)?;
    let dims = session.grid().dims();
    log::info!("board {dims} cells, agent at {:?}", session.agent().cell(session.board()));

    let spawn = session.board().spawn_cell();
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut scattered = session.grid().clone();
    scatter_obstacles(&mut scattered, &mut rng, 0.2, &[spawn]);
    for (cell, blocked) in scattered.cells() {
        if blocked {
            session.toggle(cell);
        }
    }

    let corners = [
        Cell::new(1, 1),
        Cell::new(1, dims.cols - 2),
        Cell::new(dims.rows - 2, dims.cols - 2),
        Cell::new(dims.rows - 2, 1),
    ];

    let (mut replans, mut failures) = (0, 0);
    for (i, &corner) in corners.iter().enumerate() {
        let (x, y) = session.board().cell_center(corner);
        session.pointer(PointerEvent::Move(x, y));

        if i == 2 {
            // Draw a horizontal wall through the middle of the board.
            let row = dims.rows / 2;
            let (sx, sy) = session.board().cell_center(Cell::new(row, 0));
            session.pointer(PointerEvent::Press(sx, sy));
            for col in 1..dims.cols - 3 {
                let (wx, wy) = session.board().cell_center(Cell::new(row, col));
                session.pointer(PointerEvent::Move(wx, wy));
            }
            session.pointer(PointerEvent::Release);
            session.pointer(PointerEvent::Move(x, y));
        }

        for _ in 0..TICKS_PER_WAYPOINT {
            match session.tick(TICK) {
                TickReport::Planned { .. } => replans += 1,
                TickReport::Failed(reason) => {
                    replans += 1;
                    failures += 1;
                    log::debug!("no plan: {reason}");
                }
                TickReport::Kept | TickReport::Idle => {}
            }
        }

        let reached = session.agent().cell(session.board());
        log::info!(
            "target {corner} -> goal {:?}, agent at {reached:?}",
            session.planner().goal()
        );
    }

    session.pointer(PointerEvent::Leave);
    println!("{}", session.render());
    println!(
        "{} ticks, {replans} searches ({failures} without a path)",
        corners.len() * TICKS_PER_WAYPOINT
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("PURSUIT_LOG", "info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
