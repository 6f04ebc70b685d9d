use winit::event::VirtualKeyCode;

use crate::board::Direction;

pub fn map_key_to_direction(key: VirtualKeyCode) -> Option<Direction> {
    match key {
        VirtualKeyCode::W | VirtualKeyCode::Up => Some(Direction::Up),
        VirtualKeyCode::S | VirtualKeyCode::Down => Some(Direction::Down),
        VirtualKeyCode::A | VirtualKeyCode::Left => Some(Direction::Left),
        VirtualKeyCode::D | VirtualKeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

pub fn is_quit_key(key: VirtualKeyCode) -> bool {
    matches!(key, VirtualKeyCode::Escape)
}
