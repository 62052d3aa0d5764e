/*
 * Grid Module
 *
 * This module defines the occupancy grid the player crawls on. The grid is
 * toroidal: every coordinate is wrapped back into range, so walking off one
 * edge re-enters from the opposite one. Each cell carries a single occupied
 * flag stored in a flat row-major vector.
 *
 * The grid also owns the mapping from grid cells to world space. The world
 * surface is a bowl: columns wrap around the vertical axis and rows climb
 * towards a narrower rim.
 */

use nannou::prelude::*;
use std::f32::consts::TAU;

// Default squash applied to the row coordinate before it is mapped onto the bowl
pub const DEFAULT_VERTICAL_COMPRESSION: f32 = 0.75;

// A discrete cell address. Coordinates may be out of range until wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    // Offset this position by a delta without wrapping
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for GridPosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    vertical_compression: f32,
    occupied: Vec<bool>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_vertical_compression(width, height, DEFAULT_VERTICAL_COMPRESSION)
    }

    pub fn with_vertical_compression(width: u32, height: u32, vertical_compression: f32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero, got {width}x{height}");

        let width = i32::try_from(width).expect("grid width exceeds i32::MAX");
        let height = i32::try_from(height).expect("grid height exceeds i32::MAX");

        Self {
            width,
            height,
            vertical_compression,
            // Every cell starts out free
            occupied: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn vertical_compression(&self) -> f32 {
        self.vertical_compression
    }

    // The cell the player starts from
    pub fn center(&self) -> GridPosition {
        GridPosition::new(self.width / 2, self.height / 2)
    }

    #[inline]
    pub fn contains(&self, pos: GridPosition) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    // Convert a wrapped position to its slot in the flat occupancy vector
    #[inline]
    fn index(&self, pos: GridPosition) -> usize {
        assert!(
            self.contains(pos),
            "grid position ({}, {}) outside {}x{} grid",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        pos.y as usize * self.width as usize + pos.x as usize
    }

    // Normalize any integer coordinate into [0, width) x [0, height)
    #[inline]
    pub fn wrap(&self, pos: GridPosition) -> GridPosition {
        GridPosition::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    // True if the (already wrapped) cell is free
    #[inline]
    pub fn is_empty(&self, pos: GridPosition) -> bool {
        !self.occupied[self.index(pos)]
    }

    #[inline]
    pub fn set_occupied(&mut self, pos: GridPosition, occupied: bool) {
        let index = self.index(pos);
        self.occupied[index] = occupied;
    }

    // Wrap a candidate position and claim it if it is free.
    // Returns the wrapped cell on success and None if something is already there.
    pub fn try_occupy(&mut self, pos: GridPosition) -> Option<GridPosition> {
        let pos = self.wrap(pos);
        if !self.is_empty(pos) {
            return None;
        }

        self.set_occupied(pos, true);
        Some(pos)
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&occupied| occupied).count()
    }

    // Iterate over every occupied cell in row-major order
    pub fn occupied_cells(&self) -> impl Iterator<Item = GridPosition> + '_ {
        let width = self.width as usize;
        self.occupied
            .iter()
            .enumerate()
            .filter(|(_, &occupied)| occupied)
            .map(move |(i, _)| GridPosition::new((i % width) as i32, (i / width) as i32))
    }

    // Free every cell
    pub fn clear(&mut self) {
        self.occupied.iter_mut().for_each(|cell| *cell = false);
    }

    // Map a wrapped grid cell onto the bowl surface.
    //
    // Columns sweep a full turn around the Y axis, rows rise from the wide base
    // towards the rim while the radius shrinks linearly. The arithmetic is kept in
    // the exact order below so every consumer sees bit-identical positions.
    pub fn grid_to_world(&self, pos: GridPosition) -> Vec3 {
        let u = TAU * pos.x as f32 / (self.width as f32 - 1.0);
        let v = self.vertical_compression * pos.y as f32 / (self.height as f32 - 1.0);
        let r = 0.5 * self.width as f32;
        let h = self.height as f32;

        let x = r * (1.0 - v) * u.cos();
        let y = h * (v - 0.5);
        let z = r * (1.0 - v) * -u.sin();

        vec3(x, y, z)
    }
}
