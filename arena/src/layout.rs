use std::{collections::BTreeSet, str::FromStr, sync::Arc};

use clap::ValueEnum;
use color_eyre::eyre::{eyre, Report, Result};

use crate::pursuit::{Position, Pursuit, Status};

const SMALL: &str = "\
%%%%%%%%%%
%P.....G.%
%.%%.%%%.%
%........%
%%%%%%%%%%";

const OPEN: &str = "\
%%%%%%%%%%%%
%P.........%
%..........%
%....%%....%
%..........%
%.........G%
%%%%%%%%%%%%";

const CORRIDOR: &str = "\
%%%%%%%%%%%%%
%.....P.....%
%.%%%%%%%%%.%
%G....%....G%
%%%%%%%%%%%%%";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BuiltinLayout {
    /// One chaser, a short loop
    Small,
    /// One chaser, lots of room to run
    Open,
    /// Two chasers closing in from both ends
    Corridor,
}

impl BuiltinLayout {
    pub(crate) fn layout(self) -> Result<Layout> {
        let text = match self {
            BuiltinLayout::Small => SMALL,
            BuiltinLayout::Open => OPEN,
            BuiltinLayout::Corridor => CORRIDOR,
        };

        text.parse()
    }
}

/// Which squares are walls. Anything outside the grid counts as a wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Walls {
    pub(crate) width: usize,
    pub(crate) height: usize,
    cells: Vec<bool>,
}

impl Walls {
    pub(crate) fn is_wall(&self, position: Position) -> bool {
        if position.x >= self.width || position.y >= self.height {
            return true;
        }

        self.cells[position.y * self.width + position.x]
    }
}

/// A parsed layout, before any moves have been made
///
/// Layouts are rows of text: `%` is a wall, `.` a pellet, `P` the runner, `G` a chaser and a
/// space an empty square. Chasers are numbered in reading order.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    walls: Walls,
    runner: Position,
    chasers: Vec<Position>,
    pellets: BTreeSet<Position>,
}

impl Layout {
    pub(crate) fn into_game(self) -> Pursuit {
        Pursuit {
            walls: Arc::new(self.walls),
            runner: self.runner,
            chasers: self.chasers,
            pellets: self.pellets,
            score: 0,
            status: Status::Running,
        }
    }
}

impl FromStr for Layout {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim_end)
            .filter(|row| !row.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(eyre!("Layout is empty"));
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut runner = None;
        let mut chasers = vec![];
        let mut pellets = BTreeSet::new();

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(eyre!(
                    "Row {y} is {} squares wide, expected {width}",
                    row.chars().count()
                ));
            }

            for (x, c) in row.chars().enumerate() {
                let position = Position { x, y };

                match c {
                    '%' => {}
                    ' ' => {}
                    '.' => {
                        pellets.insert(position);
                    }
                    'P' => {
                        if runner.replace(position).is_some() {
                            return Err(eyre!("Layout has more than one runner"));
                        }
                    }
                    'G' => chasers.push(position),
                    other => return Err(eyre!("Unknown square {other:?} at ({x}, {y})")),
                }

                cells.push(c == '%');
            }
        }

        let runner = runner.ok_or_else(|| eyre!("Layout has no runner"))?;
        if pellets.is_empty() {
            return Err(eyre!("Layout has no pellets"));
        }

        Ok(Layout {
            walls: Walls {
                width,
                height,
                cells,
            },
            runner,
            chasers,
            pellets,
        })
    }
}
