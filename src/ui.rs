//! Form rendering
//!
//! A plain stdout redraw of the pad after every change: text field, voice
//! list, rate/pitch readouts, playback state and key hints. Raw mode is
//! active, so lines end with CRLF and the screen is cleared with ANSI
//! escapes. Presentation only; all state lives in the Player.

use crate::player::{Playback, Player};
use crate::Result;
use std::io::{self, Write};

/// Voices shown in the list before it is elided
const VOICE_ROWS: usize = 8;

/// Redraw the whole form
pub fn render(player: &Player) -> Result<()> {
    let mut out = io::stdout().lock();

    write!(out, "\x1b[2J\x1b[H")?;
    write!(out, "speakpad {}\r\n\r\n", crate::VERSION)?;

    write!(out, "Text:\r\n")?;
    if player.text().is_empty() {
        write!(out, "  (type to fill the pad)\r\n")?;
    } else {
        for line in player.text().split('\n') {
            write!(out, "  {}\r\n", line)?;
        }
    }
    write!(out, "\r\n")?;

    render_voices(&mut out, player)?;

    write!(
        out,
        "Rate: {:.2}   Pitch: {:.2}\r\n",
        player.rate(),
        player.pitch()
    )?;

    let state = match player.playback() {
        Playback::Idle => "idle",
        Playback::Speaking => "speaking",
        Playback::Paused => "paused",
    };
    write!(out, "State: {}\r\n", state)?;

    if !player.has_engine() {
        write!(out, "Speech engine unavailable; playback is disabled\r\n")?;
    } else if !player.can_speak() {
        write!(out, "Play disabled: the pad is empty\r\n")?;
    }

    if !player.status().is_empty() {
        write!(out, "\r\n{}\r\n", player.status())?;
    }

    write!(
        out,
        "\r\nalt+p play   alt+a pause   alt+r resume   alt+s stop\r\n"
    )?;
    write!(
        out,
        "alt+v/V voice   alt+./, rate   alt+>/< pitch   ctrl+u clear   alt+c settings   alt+q quit\r\n"
    )?;

    out.flush()?;
    Ok(())
}

/// The "dropdown": a numbered voice list with the selection marked
fn render_voices(out: &mut impl Write, player: &Player) -> Result<()> {
    let catalog = player.catalog();

    if catalog.is_empty() {
        match catalog.selected_name() {
            Some(name) => write!(out, "Voice: {} (engine reports no voices)\r\n", name)?,
            None => write!(out, "Voice: engine default (no voices reported)\r\n")?,
        }
        return Ok(());
    }

    write!(out, "Voices ({}):\r\n", catalog.len())?;
    let selected = catalog.selected_name();
    for (i, voice) in catalog.voices().iter().take(VOICE_ROWS).enumerate() {
        let marker = if selected == Some(voice.name.as_str()) {
            '>'
        } else {
            ' '
        };
        write!(
            out,
            " {} {:2}. {} ({})\r\n",
            marker,
            i + 1,
            voice.name,
            voice.language
        )?;
    }
    if catalog.len() > VOICE_ROWS {
        write!(out, "    ... and {} more\r\n", catalog.len() - VOICE_ROWS)?;
    }

    // The selection may point past the visible rows or at a voice no
    // longer in the list; name it explicitly either way
    if let Some(name) = selected {
        let visible = catalog
            .voices()
            .iter()
            .take(VOICE_ROWS)
            .any(|v| v.name == name);
        if !visible {
            write!(out, "Selected: {}\r\n", name)?;
        }
    }

    Ok(())
}
