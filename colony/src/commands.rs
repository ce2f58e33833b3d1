use std::fmt::Write as _;

use anyhow::Result;
use clap::Subcommand;
use colony_core::{
    config::SyncConfig,
    models::{Action, PlayerId, Rank},
    PermissionView,
};
use colony_sync::{ColonyViewMessage, PermissionsReplica};
use tracing::info;

use crate::store::ColonyStore;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print members and the permission matrix
    Show,

    /// Register a player (name or id) at a rank
    AddPlayer {
        player: String,
        #[arg(long, default_value = "NEUTRAL")]
        rank: Rank,
    },

    /// Remove a player; the owner cannot be removed
    RemovePlayer { player: String },

    /// Set a player's rank, registering them if needed
    SetRank { player: String, rank: Rank },

    Promote { player: String },

    Demote { player: String },

    /// Grant an action to a rank
    Grant { rank: Rank, action: Action },

    /// Revoke an action from a rank
    Revoke { rank: Rank, action: Action },

    Toggle { rank: Rank, action: Action },

    /// Whether a player may perform an action
    Check { player: String, action: Action },

    /// Hex-encoded view message a player would receive
    View {
        viewer: String,
        #[arg(long, default_value_t = 0)]
        colony_id: u32,
        /// Mark the message as a new subscription
        #[arg(long)]
        subscribe: bool,
    },
}

/// Run one command against the loaded colony and return what to print
pub fn run(command: &Command, store: &mut ColonyStore, limits: &SyncConfig) -> Result<String> {
    let output = match command {
        Command::Show => show(store)?,
        Command::AddPlayer { player, rank } => {
            let added = match player.parse::<PlayerId>() {
                Ok(id) => store.colony.add_player_by_id(&id, *rank),
                Err(_) => store.colony.add_player_by_name(player, *rank),
            };
            outcome(added, &format!("added {player} as {rank}"), "player not added")
        }
        Command::RemovePlayer { player } => {
            let id = store.resolve(player)?;
            outcome(store.colony.remove_player(&id), &format!("removed {player}"), "player not removed")
        }
        Command::SetRank { player, rank } => {
            let id = store.resolve(player)?;
            outcome(
                store.colony.set_player_rank(&id, *rank),
                &format!("{player} is now {rank}"),
                "rank not changed",
            )
        }
        Command::Promote { player } => {
            let id = store.resolve(player)?;
            let before = store.colony.players().rank_of(&id);
            moved(player, before, store.colony.promote(&id))
        }
        Command::Demote { player } => {
            let id = store.resolve(player)?;
            let before = store.colony.players().rank_of(&id);
            moved(player, before, store.colony.demote(&id))
        }
        Command::Grant { rank, action } => {
            store.colony.set_permission(*rank, *action);
            format!("{rank} may {action}")
        }
        Command::Revoke { rank, action } => {
            store.colony.remove_permission(*rank, *action);
            format!("{rank} may not {action}")
        }
        Command::Toggle { rank, action } => {
            if store.colony.toggle_permission(*rank, *action) {
                format!("{rank} may {action}")
            } else {
                format!("{rank} may not {action}")
            }
        }
        Command::Check { player, action } => {
            let id = store.resolve(player)?;
            match store.colony.check_permission(&id, *action) {
                Ok(()) => "allowed".to_string(),
                Err(e) => format!("denied: {e}"),
            }
        }
        Command::View {
            viewer,
            colony_id,
            subscribe,
        } => {
            let id = store.resolve(viewer)?;
            let message = ColonyViewMessage::for_viewer(*colony_id, &store.colony, &id, *subscribe)?;
            let bytes = message.to_bytes();
            // the tool must be able to read back what it sends
            PermissionsReplica::decode(&mut message.payload_reader(), limits)?;
            info!(colony_id, viewer = %id, bytes = bytes.len(), "Encoded colony view");
            hex::encode(&bytes)
        }
    };
    Ok(output)
}

fn outcome(changed: bool, done: &str, declined: &str) -> String {
    if changed {
        done.to_string()
    } else {
        declined.to_string()
    }
}

fn moved(player: &str, before: Option<Rank>, after: Option<Rank>) -> String {
    match (before, after) {
        (Some(before), Some(after)) if before == after => format!("{player} stays {after}"),
        (_, Some(after)) => format!("{player} is now {after}"),
        _ => format!("{player} is not a colony member"),
    }
}

fn show(store: &ColonyStore) -> Result<String> {
    let colony = &store.colony;
    let mut out = String::new();
    writeln!(out, "players:")?;
    for rank in Rank::ALL {
        let mut players = colony.players_by_rank(rank);
        players.sort_by(|a, b| a.name().cmp(b.name()));
        for player in players {
            writeln!(out, "  {:<8} {} ({})", rank.as_str(), player.name(), player.id())?;
        }
    }
    writeln!(out, "permissions:")?;
    for (rank, flags) in colony.permissions().iter() {
        let actions: Vec<&str> = flags.actions().map(Action::as_str).collect();
        writeln!(out, "  {:<8} {}", rank.as_str(), actions.join(", "))?;
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_core::config::StorageConfig;

    fn store_with_profiles(dir: &std::path::Path, names: &[&str]) -> (ColonyStore, Vec<PlayerId>) {
        let ids: Vec<PlayerId> = names.iter().map(|_| PlayerId::new()).collect();
        let profiles: Vec<String> = ids
            .iter()
            .zip(names)
            .map(|(id, name)| format!(r#"{{"id": "{id}", "name": "{name}"}}"#))
            .collect();
        std::fs::write(dir.join("profiles.json"), format!("[{}]", profiles.join(","))).unwrap();
        let storage = StorageConfig {
            permissions_path: dir.join("permissions.json").display().to_string(),
            profiles_path: dir.join("profiles.json").display().to_string(),
        };
        (ColonyStore::open(&storage).unwrap(), ids)
    }

    fn run_ok(command: Command, store: &mut ColonyStore) -> String {
        run(&command, store, &SyncConfig::default()).unwrap()
    }

    #[test]
    fn test_membership_commands() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, ids) = store_with_profiles(dir.path(), &["Mayor", "Trader"]);

        let out = run_ok(
            Command::SetRank {
                player: "Mayor".to_string(),
                rank: Rank::Owner,
            },
            &mut store,
        );
        assert_eq!(out, "Mayor is now OWNER");

        let out = run_ok(
            Command::AddPlayer {
                player: "trader".to_string(),
                rank: Rank::Neutral,
            },
            &mut store,
        );
        assert_eq!(out, "added trader as NEUTRAL");
        assert_eq!(
            run_ok(Command::Promote { player: "Trader".to_string() }, &mut store),
            "Trader is now FRIEND"
        );
        assert_eq!(
            run_ok(Command::Promote { player: "Mayor".to_string() }, &mut store),
            "Mayor stays OWNER"
        );
        assert_eq!(
            run_ok(Command::RemovePlayer { player: "Mayor".to_string() }, &mut store),
            "player not removed"
        );
        assert_eq!(store.colony.get_owner(), Some(ids[0]));
        assert!(store.colony.is_dirty());
    }

    #[test]
    fn test_permission_commands() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, _) = store_with_profiles(dir.path(), &["Trader"]);
        let trader = store.resolve("Trader").unwrap();
        store.colony.set_player_rank(&trader, Rank::Friend);

        let check = || Command::Check {
            player: "Trader".to_string(),
            action: Action::PlaceStructure,
        };
        assert!(run_ok(check(), &mut store).starts_with("denied"));
        run_ok(
            Command::Grant {
                rank: Rank::Friend,
                action: Action::PlaceStructure,
            },
            &mut store,
        );
        assert_eq!(run_ok(check(), &mut store), "allowed");
        let out = run_ok(
            Command::Toggle {
                rank: Rank::Friend,
                action: Action::PlaceStructure,
            },
            &mut store,
        );
        assert_eq!(out, "FRIEND may not PLACE_STRUCTURE");
    }

    #[test]
    fn test_view_is_hex_message() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, _) = store_with_profiles(dir.path(), &["Mayor"]);
        let mayor = store.resolve("Mayor").unwrap();
        store.colony.set_player_rank(&mayor, Rank::Owner);

        let out = run_ok(
            Command::View {
                viewer: "Mayor".to_string(),
                colony_id: 258,
                subscribe: true,
            },
            &mut store,
        );
        let bytes = hex::decode(&out).unwrap();
        let message = ColonyViewMessage::from_bytes(bytes.into()).unwrap();
        assert_eq!(message.colony_id, 258);
        assert!(message.is_new_subscription);
        assert!(out.starts_with("0000010201"));
    }

    #[test]
    fn test_show_lists_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let (mut store, ids) = store_with_profiles(dir.path(), &["Mayor"]);
        store.colony.set_player_rank(&ids[0], Rank::Owner);
        let out = run_ok(Command::Show, &mut store);
        assert!(out.starts_with("players:"));
        assert!(out.contains(&format!("OWNER    Mayor ({})", ids[0])));
        assert!(out.contains("HOSTILE  ALLOW_GUARD_AGGRESSION"));
        assert!(out.lines().any(|line| line.trim() == "NEUTRAL"));
    }
}
