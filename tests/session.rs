//! Tests whole games played through the text session
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::io::Cursor;
use arbiter::chess::{Color, Game, PieceKind, Status};
use arbiter::config::{DisplaySettings, Settings};
use arbiter::protocol::Session;

fn play(input: &str, display: DisplaySettings) -> (Game, Vec<String>) {
    let mut session = Session::new(Cursor::new(input.to_string()), Vec::new(), display);
    session.run().expect("session runs");
    let game = session.game().clone();
    let output = String::from_utf8(session.into_output()).expect("utf-8 output");

    (game, output.lines().map(str::to_string).collect())
}

fn quiet() -> DisplaySettings {
    DisplaySettings { show_board: false, ..Settings::default().display }
}

const TO_PROMOTION: &str = "a2a4\nb7b5\na4b5\na7a6\nb5a6\nc8b7\na6b7\nb8c6\n";

#[test]
fn promotion_in_one_command() {
    let input = format!("{}b7a8q\n", TO_PROMOTION);
    let (game, lines) = play(&input, quiet());
    assert_eq!(lines[lines.len() - 2], "ok");
    assert_eq!(lines[lines.len() - 1], "Black to move");
    let view = game.snapshot();
    assert_eq!(view.at("a8".parse().expect("valid square")),
        Some((PieceKind::Queen, Color::White)));
}

#[test]
fn promotion_in_two_commands() {
    let input = format!("{}b7 a8\ne7e5\nn\n", TO_PROMOTION);
    let (game, lines) = play(&input, quiet());
    let n = lines.len();
    assert_eq!(lines[n - 4], "promote pawn on a8 (q, r, b or n)");
    assert_eq!(lines[n - 3], "Error (a promotion must be chosen first): e7e5");
    assert_eq!(lines[n - 2], "ok");
    assert_eq!(lines[n - 1], "Black to move");
    let view = game.snapshot();
    assert_eq!(view.at("a8".parse().expect("valid square")),
        Some((PieceKind::Knight, Color::White)));
}

#[test]
fn scholars_mate_with_the_board_shown() {
    let input = "e2e4\ne7e5\nd1h5\nb8c6\nf1c4\ng8f6\nh5f7\ne8f7\n";
    let (game, lines) = play(input, DisplaySettings::default());
    assert_eq!(game.status(), Status::Checkmate { winner: Color::White });

    let mate = lines.iter().position(|l| l == "checkmate, White wins").expect("mate reported");
    assert_eq!(lines[mate + 1], "8 r . b q k b . r");
    assert_eq!(lines[mate + 2], "7 p p p p . Q p p");
    assert_eq!(lines[mate + 9], "  a b c d e f g h");
    assert_eq!(lines.last().map(String::as_str), Some("Error (the game is over): e8f7"));
}

#[test]
fn help_lists_the_commands() {
    let (_, lines) = play("help\n", quiet());
    assert_eq!(lines[1], "commands:");
    assert!(lines.iter().any(|l| l.trim_start().starts_with("resign")));
}
