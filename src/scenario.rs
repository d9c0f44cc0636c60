use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use eyre::WrapErr;
use serde::{Deserialize, Serialize};

use crate::cursor::{Cursor, Interaction};
use crate::simulator::{Propagation, Simulator};
use crate::world::{BlockKind, Direction, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Place {
        x: i32,
        y: i32,
        kind: BlockKind,
        #[serde(default)]
        facing: Direction,
    },
    Toggle {
        x: i32,
        y: i32,
    },
    Move {
        direction: Direction,
    },
    Select {
        kind: BlockKind,
    },
    Face {
        direction: Direction,
    },
    Reset,
    Interact,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub height: Option<usize>,
    pub actions: Vec<Action>,
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).wrap_err_with(|| format!("Cannot open scenario {path:?}"))?;

        serde_json::from_reader(BufReader::new(file))
            .wrap_err_with(|| format!("Cannot parse scenario {path:?}"))
    }

    pub fn parse(src: &str) -> eyre::Result<Self> {
        Ok(serde_json::from_str(src)?)
    }

    // sums the propagation of every action
    pub fn replay(&self, sim: &mut Simulator, cursor: &mut Cursor) -> eyre::Result<Propagation> {
        let mut total = Propagation::default();

        for (index, action) in self.actions.iter().enumerate() {
            tracing::debug!("replay action #{index}: {:?}", action);

            let propagation =
                Self::apply(action, sim, cursor).wrap_err_with(|| format!("Action #{index} failed"))?;

            if propagation.truncated {
                tracing::warn!("action #{index} hit the cascade limit: {:?}", action);
            }

            total.merge(propagation);
        }

        Ok(total)
    }

    fn apply(action: &Action, sim: &mut Simulator, cursor: &mut Cursor) -> eyre::Result<Propagation> {
        let propagation = match *action {
            Action::Place { x, y, kind, facing } => {
                sim.try_place(Position(x, y), kind, facing)?.propagation
            }
            Action::Toggle { x, y } => {
                let pos = Position(x, y);
                let Some(toggle) = sim.toggle_lever(pos) else {
                    eyre::bail!("No lever at {pos:?} to toggle");
                };

                toggle.propagation
            }
            Action::Move { direction } => {
                cursor.move_towards(direction, sim.size());
                Propagation::default()
            }
            Action::Select { kind } => {
                cursor.select(kind);
                Propagation::default()
            }
            Action::Face { direction } => {
                eyre::ensure!(direction.is_cardinal(), "Cursor cannot face {direction}");
                cursor.face(direction);
                Propagation::default()
            }
            Action::Reset => {
                cursor.reset();
                Propagation::default()
            }
            Action::Interact => match cursor.interact(sim) {
                Interaction::Placed(placement) => placement.propagation,
                Interaction::Toggled(toggle) => toggle.propagation,
                Interaction::Nothing => {
                    tracing::warn!("nothing to interact with at {:?}", cursor.position);
                    Propagation::default()
                }
            },
        };

        Ok(propagation)
    }
}
