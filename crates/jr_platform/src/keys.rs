//! Translation from winit physical keys to the engine's key names.

use jr_core::KeyName;
use winit::keyboard::KeyCode;

pub fn map_key(key_code: KeyCode) -> Option<KeyName> {
    let key = match key_code {
        KeyCode::ArrowLeft => KeyName::Left,
        KeyCode::ArrowRight => KeyName::Right,
        KeyCode::ArrowUp => KeyName::Up,
        KeyCode::ArrowDown => KeyName::Down,
        KeyCode::Space => KeyName::Space,
        KeyCode::Enter | KeyCode::NumpadEnter => KeyName::Enter,
        KeyCode::Escape => KeyName::Escape,
        KeyCode::Backspace => KeyName::Backspace,
        KeyCode::Tab => KeyName::Tab,
        other => return letter(other).map(KeyName::Letter),
    };
    Some(key)
}

fn letter(key_code: KeyCode) -> Option<char> {
    const LETTERS: [(KeyCode, char); 26] = [
        (KeyCode::KeyA, 'A'),
        (KeyCode::KeyB, 'B'),
        (KeyCode::KeyC, 'C'),
        (KeyCode::KeyD, 'D'),
        (KeyCode::KeyE, 'E'),
        (KeyCode::KeyF, 'F'),
        (KeyCode::KeyG, 'G'),
        (KeyCode::KeyH, 'H'),
        (KeyCode::KeyI, 'I'),
        (KeyCode::KeyJ, 'J'),
        (KeyCode::KeyK, 'K'),
        (KeyCode::KeyL, 'L'),
        (KeyCode::KeyM, 'M'),
        (KeyCode::KeyN, 'N'),
        (KeyCode::KeyO, 'O'),
        (KeyCode::KeyP, 'P'),
        (KeyCode::KeyQ, 'Q'),
        (KeyCode::KeyR, 'R'),
        (KeyCode::KeyS, 'S'),
        (KeyCode::KeyT, 'T'),
        (KeyCode::KeyU, 'U'),
        (KeyCode::KeyV, 'V'),
        (KeyCode::KeyW, 'W'),
        (KeyCode::KeyX, 'X'),
        (KeyCode::KeyY, 'Y'),
        (KeyCode::KeyZ, 'Z'),
    ];
    LETTERS
        .iter()
        .find(|(code, _)| *code == key_code)
        .map(|&(_, c)| c)
}
