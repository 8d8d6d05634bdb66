#[cfg(test)]
mod tests {
    use crate::{BattleCommand, ParseError, UnitId, parse_command, parse_script};

    #[test]
    fn test_parse_attack() {
        let command = parse_command("/attack player-1 enemy-2").unwrap();

        assert_eq!(
            command,
            BattleCommand::Attack {
                attacker: UnitId::player(1),
                target: UnitId::enemy(2),
            }
        )
    }

    #[test]
    fn test_parse_without_slash_and_alias() {
        let command = parse_command("  a player-3 enemy-1 ").unwrap();

        assert_eq!(
            command,
            BattleCommand::Attack {
                attacker: UnitId::player(3),
                target: UnitId::enemy(1),
            }
        )
    }

    #[test]
    fn test_parse_reset_and_status() {
        assert_eq!(parse_command("/reset").unwrap(), BattleCommand::Reset);
        assert_eq!(parse_command("STATUS").unwrap(), BattleCommand::Status);
        assert!(parse_command("/reset now").is_err());
    }

    #[test]
    fn test_parse_attack_missing_target() {
        let result = parse_command("/attack player-1");

        assert_eq!(result, Err(ParseError::MissingField("target".to_string())));
    }

    #[test]
    fn test_parse_attack_bad_unit() {
        let result = parse_command("/attack player-1 enemy-zero");

        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_unknown() {
        let result = parse_command("/summon outlaw-legend");

        assert_eq!(
            result,
            Err(ParseError::UnknownCommand("summon".to_string()))
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_command(""), Err(ParseError::EmptyMessage));
        assert_eq!(parse_command("   "), Err(ParseError::EmptyMessage));
    }

    #[test]
    fn test_protocol_string_parses_back() {
        let command = BattleCommand::Attack {
            attacker: UnitId::player(2),
            target: UnitId::enemy(3),
        };

        assert_eq!(command.to_protocol_string(), "/attack player-2 enemy-3");
        assert_eq!(parse_command(&command.to_protocol_string()).unwrap(), command);
    }

    #[test]
    fn test_parse_script() {
        let script = "# opening volley\n/attack player-1 enemy-1\n\n/attack player-2 enemy-1\n/reset\n";
        let commands = parse_script(script).unwrap();

        assert_eq!(commands.len(), 3);
        assert_eq!(commands[2], BattleCommand::Reset);
    }

    #[test]
    fn test_parse_script_reports_line() {
        let script = "/attack player-1 enemy-1\n/fire player-2\n";
        let err = parse_script(script).unwrap_err();

        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_command_json_shape() {
        let command = BattleCommand::Attack {
            attacker: UnitId::player(1),
            target: UnitId::enemy(2),
        };
        let json = serde_json::to_value(command).unwrap();

        assert_eq!(json["type"], "attack");
        assert_eq!(json["attacker"], "player-1");
        assert_eq!(json["target"], "enemy-2");
    }
}
