use crate::Position;
use serde::Serialize;

/// Observer of visible state changes. Called synchronously as each mutation
/// happens; nothing it does feeds back into the solver.
pub trait Renderer {
    fn on_reveal(&mut self, _cell: Position, _number: u8) {}

    fn on_flag(&mut self, _cell: Position) {}

    fn on_detonate(&mut self, _mines: &[Position], _triggered: Position) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn on_reveal(&mut self, cell: Position, number: u8) {
        (**self).on_reveal(cell, number)
    }

    fn on_flag(&mut self, cell: Position) {
        (**self).on_flag(cell)
    }

    fn on_detonate(&mut self, mines: &[Position], triggered: Position) {
        (**self).on_detonate(mines, triggered)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenderEvent {
    Reveal { cell: Position, number: u8 },
    Flag { cell: Position },
    Detonate { mines: Vec<Position>, triggered: Position },
}

/// Records every notification in order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<RenderEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(&self) -> impl Iterator<Item = Position> + '_ {
        self.events.iter().filter_map(|e| match e {
            RenderEvent::Flag { cell } => Some(*cell),
            _ => None,
        })
    }

    pub fn reveals(&self) -> impl Iterator<Item = (Position, u8)> + '_ {
        self.events.iter().filter_map(|e| match e {
            RenderEvent::Reveal { cell, number } => Some((*cell, *number)),
            _ => None,
        })
    }
}

impl Renderer for EventLog {
    fn on_reveal(&mut self, cell: Position, number: u8) {
        self.events.push(RenderEvent::Reveal { cell, number });
    }

    fn on_flag(&mut self, cell: Position) {
        self.events.push(RenderEvent::Flag { cell });
    }

    fn on_detonate(&mut self, mines: &[Position], triggered: Position) {
        self.events.push(RenderEvent::Detonate {
            mines: mines.to_vec(),
            triggered,
        });
    }
}
