//! Store records → wire DTOs.

use pokerforge_protocol::wire::{
    CardDto, CurrentGameDto, GameDto, GameResultDto, PlayerDto, RoomDto, RoomStateDto,
};
use pokerforge_room::{Game, Player, Room, RoomState};

pub(crate) fn room(room: &Room) -> RoomDto {
    RoomDto {
        id: room.code.clone(),
        name: room.name.clone(),
        owner: room.owner.clone(),
    }
}

pub(crate) fn game(game: &Game) -> GameDto {
    GameDto {
        id: game.id.clone(),
        room_id: game.room.clone(),
        name: game.name.clone(),
        status: game.status,
        max_score: game.max_score,
        average_score: game.average_score,
    }
}

fn player(player: &Player) -> PlayerDto {
    PlayerDto {
        id: player.user_id.clone(),
        name: player.name.clone(),
        color: player.color.clone(),
    }
}

/// Cards and aggregates stay hidden until the game is completed.
fn current_game(game: &Game) -> CurrentGameDto {
    let revealed = game.status.is_completed();
    let (max_score, average_score, cards) = if revealed {
        let cards = game
            .cards
            .iter()
            .map(|card| CardDto {
                score: card.score,
                player: player(&card.player),
            })
            .collect();
        (game.max_score, game.average_score, cards)
    } else {
        (0, 0, Vec::new())
    };

    CurrentGameDto {
        id: game.id.clone(),
        name: game.name.clone(),
        status: game.status,
        max_score,
        average_score,
        cards_revealed: revealed,
        cards,
    }
}

/// Full snapshot. `game_results` stays empty until the room has played
/// more than one game, since a single game is already `current_game`.
pub(crate) fn room_state(state: &RoomState) -> RoomStateDto {
    let game_results = if state.games.len() > 1 {
        state
            .games
            .iter()
            .map(|game| GameResultDto {
                game_id: game.id.clone(),
                name: game.name.clone(),
                status: game.status,
                max_score: game.max_score,
                average_score: game.average_score,
            })
            .collect()
    } else {
        Vec::new()
    };

    RoomStateDto {
        room_id: state.room.code.clone(),
        name: state.room.name.clone(),
        owner: state.room.owner.clone(),
        commit: state.room.commit.clone(),
        players: state.room.players.iter().map(player).collect(),
        current_game: state.current_game().map(current_game),
        game_results,
    }
}
