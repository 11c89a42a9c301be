use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Back,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Move(MoveDirection),
    Turn(TurnDirection),
    ToggleMode,
    Quit,
}

/// Key bindings: arrows fly, A/D turn, Space toggles geometry, Escape quits.
pub fn command_for_key(key: KeyCode) -> Option<InputCommand> {
    let command = match key {
        KeyCode::ArrowUp => InputCommand::Move(MoveDirection::Forward),
        KeyCode::ArrowDown => InputCommand::Move(MoveDirection::Back),
        KeyCode::ArrowLeft => InputCommand::Move(MoveDirection::Left),
        KeyCode::ArrowRight => InputCommand::Move(MoveDirection::Right),
        KeyCode::KeyA => InputCommand::Turn(TurnDirection::Left),
        KeyCode::KeyD => InputCommand::Turn(TurnDirection::Right),
        KeyCode::Space => InputCommand::ToggleMode,
        KeyCode::Escape => InputCommand::Quit,
        _ => return None,
    };
    Some(command)
}
