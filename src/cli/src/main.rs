use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use case_library::{
    CornerPos, EdgePos, F2lCase, F2lQuery, LazyLibrary, OllCase, OllPattern, builtin_f2l_cases,
    builtin_oll_cases, f2l_cases_from_path, lookup_f2l, match_oll, oll_cases_from_path,
};
use clap::Parser;
use color_eyre::eyre::bail;
use cross_solver::{SelectionState, solve_cross};
use cube_core::{CrossEdge, CrossState, EdgeSlot};
use log::debug;

static OLL_LIBRARY: LazyLibrary<Vec<OllCase>> = LazyLibrary::new();
static F2L_LIBRARY: LazyLibrary<Vec<F2lCase>> = LazyLibrary::new();

/// Solves white crosses and recognizes OLL and F2L cases
#[derive(Parser)]
#[command(version, about)]
enum Commands {
    /// Find a shortest cross solution from a painted state
    SolveCross {
        /// The state, e.g. "WG=UF+ WO=DR+ WB=DB- WR=DL+"
        state: String,
    },
    /// Recognize a last-layer orientation pattern in any grip
    MatchOll {
        /// Eight top bits, row by row with the center skipped
        top: String,
        /// Twelve surrounding bits: north, west, east, then south
        ring: String,
        /// Read cases from this JSON file instead of the bundled set
        #[arg(long)]
        cases: Option<PathBuf>,
    },
    /// Look up a first-two-layers case by its four attributes
    LookupF2l {
        /// UFR, UBR, UBL, UFL or FR_SLOT
        corner_pos: CornerPos,
        /// 0 white up, 1 white right, 2 white front
        corner_ori: u8,
        /// UR, UF, UL, UB or FR
        edge_pos: EdgePos,
        /// 0 unflipped, 1 flipped
        edge_ori: u8,
        /// Read cases from this JSON file instead of the bundled set
        #[arg(long)]
        cases: Option<PathBuf>,
    },
    /// Paint a cross state slot by slot on stdin, then solve it
    Paint,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    match Commands::parse() {
        Commands::SolveCross { state } => {
            let state = parse_cross_state(&state)?;
            print_solution(&state)?;
        }
        Commands::MatchOll { top, ring, cases } => {
            let pattern = OllPattern::from_strings(&top, &ring)?;
            let library = match cases {
                Some(path) => Arc::new(oll_cases_from_path(&path)?),
                None => OLL_LIBRARY.get_or_load(builtin_oll_cases)?,
            };
            debug!("matching {pattern} against {} cases", library.len());
            match match_oll(&pattern, &library) {
                Some(found) => {
                    match &found.case.name {
                        Some(name) => println!("{} ({name})", found.case.id),
                        None => println!("{}", found.case.id),
                    }
                    match found.realign() {
                        Some(mv) => println!("realign: {mv}"),
                        None => println!("realign: none"),
                    }
                    println!("solution: {}", found.case.solution);
                }
                None => println!("no matching case"),
            }
        }
        Commands::LookupF2l {
            corner_pos,
            corner_ori,
            edge_pos,
            edge_ori,
            cases,
        } => {
            let library = match cases {
                Some(path) => Arc::new(f2l_cases_from_path(&path)?),
                None => F2L_LIBRARY.get_or_load(builtin_f2l_cases)?,
            };
            let query = F2lQuery {
                corner_pos,
                corner_ori,
                edge_pos,
                edge_ori,
            };
            match lookup_f2l(&query, &library) {
                Some(case) => {
                    match &case.name {
                        Some(name) => println!("{} ({name})", case.id),
                        None => println!("{}", case.id),
                    }
                    if case.solution.is_empty() {
                        println!("solution: (already solved)");
                    } else {
                        println!("solution: {}", case.solution);
                    }
                }
                None => println!("no matching case"),
            }
        }
        Commands::Paint => paint()?,
    }

    Ok(())
}

/// Parses "WG=UF+ WO=DR+ WB=DB- WR=DL+" into a full cross state.
fn parse_cross_state(spec: &str) -> color_eyre::Result<CrossState> {
    let mut assignments = Vec::new();
    for token in spec.split_whitespace() {
        let Some((edge, rest)) = token.split_once('=') else {
            bail!("`{token}` is not of the form EDGE=SLOT+ or EDGE=SLOT-");
        };
        let edge: CrossEdge = edge.parse()?;
        let (slot, oriented) = if let Some(slot) = rest.strip_suffix('+') {
            (slot, true)
        } else if let Some(slot) = rest.strip_suffix('-') {
            (slot, false)
        } else {
            bail!("`{token}` must end in `+` (white on the primary facelet) or `-`");
        };
        let slot: EdgeSlot = slot.parse()?;
        assignments.push((edge, slot, oriented));
    }
    Ok(CrossState::try_from_assignments(&assignments)?)
}

fn print_solution(state: &CrossState) -> color_eyre::Result<()> {
    let solution = solve_cross(state)?;
    if solution.is_empty() {
        println!("already solved");
    } else {
        println!("{solution}");
    }
    Ok(())
}

/// The interactive painter. Each click line is "<slot> p" or "<slot> s"
/// depending on which facelet of the slot is white; repeated clicks cycle
/// the slot through the unused edge identities and then clear it.
fn paint() -> color_eyre::Result<()> {
    println!("click slots with `<slot> p` or `<slot> s` (e.g. `UF p`, `LF s`)");
    println!("`done` solves, `reset` clears everything, `quit` exits");

    let mut selection = SelectionState::new();
    let stdin = io::stdin();
    loop {
        print!("{}/4> ", selection.assigned_count());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut words = line.split_whitespace();
        match words.next() {
            None => {}
            Some("quit") => break,
            Some("reset") => selection.reset(),
            Some("done") => match selection.try_into_state() {
                Ok(state) => {
                    print_solution(&state)?;
                    break;
                }
                Err(err) => println!("{err}"),
            },
            Some(slot) => {
                let slot = match slot.parse::<EdgeSlot>() {
                    Ok(slot) => slot,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                let white_on_primary = match words.next() {
                    Some("p") => true,
                    Some("s") => false,
                    _ => {
                        println!("say which facelet is white: `{slot} p` or `{slot} s`");
                        continue;
                    }
                };
                match selection.click(slot, white_on_primary) {
                    Some(edge) => println!("{slot} = {edge}"),
                    None => println!("{slot} cleared"),
                }
            }
        }
    }

    Ok(())
}
