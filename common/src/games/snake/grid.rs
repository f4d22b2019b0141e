use std::ops::Range;

use crate::games::SessionRng;
use super::types::{CellType, Point};

/// Random samples tried before falling back to a linear scan.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementArea {
    /// Cells strictly inside the border.
    Interior,
    FullBoard,
}

/// Square occupancy board whose border ring is always `Obstacle`.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<CellType>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        let mut grid = Self {
            size,
            cells: vec![CellType::Empty; size * size],
        };
        grid.reset();
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.size && point.z < self.size
    }

    pub fn is_border(&self, point: Point) -> bool {
        point.x == 0 || point.z == 0 || point.x == self.size - 1 || point.z == self.size - 1
    }

    /// Points outside the board read as `Obstacle`.
    pub fn get(&self, point: Point) -> CellType {
        if self.contains(point) {
            self.cells[self.index(point)]
        } else {
            CellType::Obstacle
        }
    }

    pub fn set(&mut self, point: Point, cell_type: CellType) {
        debug_assert!(self.contains(point), "{} is outside the board", point);
        debug_assert!(
            !self.is_border(point) || cell_type == CellType::Obstacle,
            "border cell {} must stay an obstacle",
            point
        );
        if self.contains(point) {
            let index = self.index(point);
            self.cells[index] = cell_type;
        }
    }

    /// Marks every border cell `Obstacle` and every other cell `Empty`.
    pub fn reset(&mut self) {
        for x in 0..self.size {
            for z in 0..self.size {
                let point = Point::new(x, z);
                let index = self.index(point);
                self.cells[index] = if self.is_border(point) {
                    CellType::Obstacle
                } else {
                    CellType::Empty
                };
            }
        }
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.size).flat_map(move |x| (0..self.size).map(move |z| Point::new(x, z)))
    }

    pub fn count(&self, cell_type: CellType) -> usize {
        self.cells.iter().filter(|&&c| c == cell_type).count()
    }

    pub fn interior_cell_count(&self) -> usize {
        self.size.saturating_sub(2).pow(2)
    }

    /// Picks a random `Empty` cell of `area` that is not `forbidden`.
    ///
    /// Samples uniformly up to `MAX_PLACEMENT_ATTEMPTS` times, then scans the
    /// whole area and picks uniformly among the legal cells. `None` means the
    /// area holds no legal cell at all.
    pub fn find_placement(
        &self,
        area: PlacementArea,
        forbidden: Option<Point>,
        rng: &mut SessionRng,
    ) -> Option<Point> {
        let range = self.area_range(area);
        if range.is_empty() {
            return None;
        }

        let is_legal = |point: Point| self.get(point) == CellType::Empty && Some(point) != forbidden;

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let point = Point::new(
                rng.random_range(range.clone()),
                rng.random_range(range.clone()),
            );
            if is_legal(point) {
                return Some(point);
            }
        }

        let candidates: Vec<Point> = range
            .clone()
            .flat_map(|x| range.clone().map(move |z| Point::new(x, z)))
            .filter(|&point| is_legal(point))
            .collect();

        rng.choose(&candidates).copied()
    }

    fn area_range(&self, area: PlacementArea) -> Range<usize> {
        match area {
            PlacementArea::Interior => 1..self.size.saturating_sub(1),
            PlacementArea::FullBoard => 0..self.size,
        }
    }

    fn index(&self, point: Point) -> usize {
        point.z * self.size + point.x
    }
}
