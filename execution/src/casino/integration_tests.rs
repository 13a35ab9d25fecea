//! Integration tests for the engine facade.
//!
//! These tests drive full sessions through [`crate::Layer`]: debit at start, player inputs,
//! settlement, and the ledger balance that results.

#[cfg(test)]
mod tests {
    use crate::casino::{
        CrashPhase, FarmingInput, GameError, InvalidCommand, PlayerInput, SessionDetail,
        SessionStatus,
    };
    use crate::mocks::{create_flaky_layer, create_layer, test_user};
    use crate::rng::FixedDraws;
    use crate::state::{FileStore, SnapshotStore};
    use crate::Layer;
    use kazik_types::{
        EngineConfig, FarmingGame, GameParams, GameType, PlinkoRisk, PlinkoRows, RouletteTarget,
        Side,
    };

    const HOUR: u64 = 3_600_000;

    /// Draw landing on pocket index `index` of the wheel.
    fn pocket_draw(index: usize) -> FixedDraws {
        FixedDraws::new([(index as f64 + 0.5) / 37.0])
    }

    /// Mines on cells 22, 23 and 24.
    fn last_cells() -> FixedDraws {
        FixedDraws::new([0.999_999])
    }

    #[test]
    fn test_mines_cash_out_after_two_reveals() {
        let mut layer = create_layer(1_000);
        let id = layer
            .start_session(GameParams::Mines { mines: 3 }, 100, &mut last_cells())
            .unwrap();
        assert_eq!(layer.balance(), 900);

        let view = layer.advance(id, PlayerInput::Reveal { cell: 0 }).unwrap();
        assert_eq!(view.status, SessionStatus::Active);
        assert_eq!(view.multiplier, 1.09);
        let view = layer.advance(id, PlayerInput::Reveal { cell: 1 }).unwrap();
        assert_eq!(view.multiplier, 1.19);
        assert_eq!(view.payout, 119);

        let view = layer.advance(id, PlayerInput::CashOut).unwrap();
        assert_eq!(view.status, SessionStatus::CashedOut);
        assert_eq!(layer.settle(id), Ok(119));
        assert_eq!(layer.balance(), 1_019);
    }

    #[test]
    fn test_mines_hit_reveals_board() {
        let mut layer = create_layer(1_000);
        let id = layer
            .start_session(GameParams::Mines { mines: 3 }, 100, &mut last_cells())
            .unwrap();
        let view = layer.advance(id, PlayerInput::Reveal { cell: 3 }).unwrap();
        match view.detail {
            SessionDetail::Mines { mine_cells, .. } => assert_eq!(mine_cells, None),
            other => panic!("unexpected detail {other:?}"),
        }

        let view = layer.advance(id, PlayerInput::Reveal { cell: 23 }).unwrap();
        assert_eq!(view.status, SessionStatus::Lost);
        match view.detail {
            SessionDetail::Mines { mine_cells, .. } => {
                assert_eq!(mine_cells, Some(vec![22, 23, 24]))
            }
            other => panic!("unexpected detail {other:?}"),
        }
        assert_eq!(
            layer.advance(id, PlayerInput::Reveal { cell: 4 }),
            Err(GameError::InvalidCommand(InvalidCommand::NotActive))
        );
        assert_eq!(layer.settle(id), Ok(0));
        assert_eq!(layer.balance(), 900);
    }

    #[test]
    fn test_roulette_red_and_black() {
        let mut layer = create_layer(1_000);
        let target = RouletteTarget::Red;

        // Index 2 is 15, red on the alternating wheel.
        let id = layer
            .start_session(GameParams::Roulette { target }, 10, &mut pocket_draw(2))
            .unwrap();
        let view = layer.session(id).unwrap();
        assert_eq!(view.status, SessionStatus::Won);
        assert_eq!(layer.settle(id), Ok(20));
        assert_eq!(layer.balance(), 1_010);

        // Index 1 is 32 (black).
        let id = layer
            .start_session(GameParams::Roulette { target }, 10, &mut pocket_draw(1))
            .unwrap();
        assert_eq!(layer.session(id).unwrap().status, SessionStatus::Lost);
        assert_eq!(layer.settle(id), Ok(0));
        assert_eq!(layer.balance(), 1_000);
    }

    #[test]
    fn test_roulette_straight_and_green() {
        let mut layer = create_layer(1_000);
        let id = layer
            .start_session(
                GameParams::Roulette {
                    target: RouletteTarget::Number(32),
                },
                10,
                &mut pocket_draw(1),
            )
            .unwrap();
        assert_eq!(layer.settle(id), Ok(360));

        let id = layer
            .start_session(
                GameParams::Roulette {
                    target: RouletteTarget::Green,
                },
                10,
                &mut pocket_draw(0),
            )
            .unwrap();
        assert_eq!(layer.settle(id), Ok(140));
        assert_eq!(layer.balance(), 1_000 + 350 + 130);
    }

    #[test]
    fn test_double_settle_credits_once() {
        let mut layer = create_layer(1_000);
        let id = layer
            .start_session(
                GameParams::Roulette {
                    target: RouletteTarget::Red,
                },
                10,
                &mut pocket_draw(2),
            )
            .unwrap();
        assert_eq!(layer.settle(id), Ok(20));
        assert_eq!(
            layer.settle(id),
            Err(GameError::InvalidCommand(InvalidCommand::AlreadySettled))
        );
        assert_eq!(layer.balance(), 1_010);
        assert!(layer.session(id).unwrap().settled);
    }

    #[test]
    fn test_settle_requires_resolution() {
        let mut layer = create_layer(1_000);
        let id = layer
            .start_session(GameParams::Mines { mines: 3 }, 100, &mut last_cells())
            .unwrap();
        assert_eq!(
            layer.settle(id),
            Err(GameError::InvalidCommand(InvalidCommand::NotResolved))
        );
        assert_eq!(
            layer.advance(id, PlayerInput::CashOut),
            Err(GameError::InvalidCommand(InvalidCommand::NothingToCashOut))
        );
        assert_eq!(layer.settle(99), Err(GameError::UnknownSession(99)));
        assert_eq!(layer.balance(), 900);
    }

    #[test]
    fn test_insufficient_funds_creates_nothing() {
        let mut layer = create_layer(50);
        let result = layer.start_session(
            GameParams::Roulette {
                target: RouletteTarget::Red,
            },
            51,
            &mut pocket_draw(2),
        );
        assert_eq!(
            result,
            Err(GameError::InsufficientFunds {
                balance: 50,
                requested: 51
            })
        );
        assert!(layer.active_session().is_none());
        assert_eq!(layer.balance(), 50);

        // The whole balance can be staked.
        let id = layer
            .start_session(
                GameParams::Roulette {
                    target: RouletteTarget::Red,
                },
                50,
                &mut pocket_draw(1),
            )
            .unwrap();
        layer.settle(id).unwrap();
        assert_eq!(layer.balance(), 0);
    }

    #[test]
    fn test_rejected_parameters() {
        let mut layer = create_layer(1_000);
        let mut draws = FixedDraws::new([0.5]);
        assert!(matches!(
            layer.start_session(GameParams::Mines { mines: 0 }, 10, &mut draws),
            Err(GameError::InvalidParams(_))
        ));
        assert!(matches!(
            layer.start_session(GameParams::Dungeon { difficulty: 5 }, 10, &mut draws),
            Err(GameError::InvalidParams(_))
        ));
        assert!(matches!(
            layer.start_session(GameParams::Mines { mines: 3 }, 0, &mut draws),
            Err(GameError::InvalidParams(_))
        ));

        layer.registry_mut().set_active(GameType::Plinko, false);
        assert_eq!(
            layer.start_session(
                GameParams::Plinko {
                    rows: PlinkoRows::Eight,
                    risk: PlinkoRisk::Low
                },
                10,
                &mut draws
            ),
            Err(GameError::InvalidParams("game is not active"))
        );
        assert_eq!(draws.consumed(), 0);
        assert_eq!(layer.balance(), 1_000);
    }

    #[test]
    fn test_one_unsettled_session_at_a_time() {
        let mut layer = create_layer(1_000);
        let id = layer
            .start_session(GameParams::Mines { mines: 3 }, 100, &mut last_cells())
            .unwrap();
        layer.advance(id, PlayerInput::Reveal { cell: 0 }).unwrap();

        // Leaving the game freezes the session; it stays resumable.
        assert_eq!(
            layer.start_session(
                GameParams::Roulette {
                    target: RouletteTarget::Red
                },
                10,
                &mut pocket_draw(2)
            ),
            Err(GameError::SessionInProgress(id))
        );
        assert_eq!(layer.active_session().map(|view| view.id), Some(id));
        assert_eq!(layer.balance(), 900);

        layer.advance(id, PlayerInput::CashOut).unwrap();
        // Resolved but not yet credited still blocks.
        assert_eq!(
            layer.start_session(
                GameParams::Roulette {
                    target: RouletteTarget::Red
                },
                10,
                &mut pocket_draw(2)
            ),
            Err(GameError::SessionInProgress(id))
        );
        assert_eq!(layer.settle(id), Ok(109));
        assert!(layer.active_session().is_none());
    }

    #[test]
    fn test_forfeit_loses_stake() {
        let mut layer = create_layer(1_000);
        let id = layer
            .start_session(GameParams::Mines { mines: 3 }, 100, &mut last_cells())
            .unwrap();
        layer.advance(id, PlayerInput::Reveal { cell: 0 }).unwrap();
        assert_eq!(layer.forfeit(id), Ok(0));
        let view = layer.session(id).unwrap();
        assert_eq!(view.status, SessionStatus::Lost);
        assert!(view.settled);
        assert_eq!(layer.balance(), 900);
        assert_eq!(
            layer.forfeit(id),
            Err(GameError::InvalidCommand(InvalidCommand::AlreadySettled))
        );
    }

    #[test]
    fn test_forfeit_settles_resolved_outcome() {
        let mut layer = create_layer(1_000);
        let id = layer
            .start_session(
                GameParams::Roulette {
                    target: RouletteTarget::Red,
                },
                10,
                &mut pocket_draw(2),
            )
            .unwrap();
        assert_eq!(layer.forfeit(id), Ok(20));
        assert_eq!(layer.balance(), 1_010);
    }

    #[test]
    fn test_dungeon_full_run_and_loss() {
        let mut layer = create_layer(1_000);
        // Door 0 wins on every level.
        let id = layer
            .start_session(
                GameParams::Dungeon { difficulty: 2 },
                10,
                &mut FixedDraws::new([0.0]),
            )
            .unwrap();
        for _ in 0..9 {
            let view = layer.advance(id, PlayerInput::OpenDoor { door: 0 }).unwrap();
            assert_eq!(view.status, SessionStatus::Active);
        }
        let view = layer.advance(id, PlayerInput::OpenDoor { door: 0 }).unwrap();
        assert_eq!(view.status, SessionStatus::Won);
        // 10 × 1.94^10
        assert_eq!(layer.settle(id), Ok(7_551));

        let id = layer
            .start_session(
                GameParams::Dungeon { difficulty: 3 },
                100,
                &mut FixedDraws::new([0.0]),
            )
            .unwrap();
        assert_eq!(
            layer.advance(id, PlayerInput::OpenDoor { door: 3 }),
            Err(GameError::InvalidCommand(InvalidCommand::DoorOutOfRange))
        );
        layer.advance(id, PlayerInput::OpenDoor { door: 0 }).unwrap();
        layer.advance(id, PlayerInput::OpenDoor { door: 0 }).unwrap();
        let view = layer.advance(id, PlayerInput::OpenDoor { door: 2 }).unwrap();
        assert_eq!(view.status, SessionStatus::Lost);
        match view.detail {
            SessionDetail::Dungeon { path, level, .. } => {
                assert_eq!(level, 2);
                assert_eq!(path.map(|path| path.len()), Some(10));
            }
            other => panic!("unexpected detail {other:?}"),
        }
        assert_eq!(layer.settle(id), Ok(0));
        assert_eq!(layer.balance(), 1_000 - 10 + 7_551 - 100);
    }

    #[test]
    fn test_plinko_settles_immediately() {
        let mut layer = create_layer(1_000);
        let id = layer
            .start_session(
                GameParams::Plinko {
                    rows: PlinkoRows::Eight,
                    risk: PlinkoRisk::High,
                },
                10,
                &mut FixedDraws::new([0.9]),
            )
            .unwrap();
        let view = layer.session(id).unwrap();
        assert_eq!(view.status, SessionStatus::Won);
        assert_eq!(view.multiplier, 29.0);
        assert_eq!(
            layer.advance(id, PlayerInput::CashOut),
            Err(GameError::InvalidCommand(InvalidCommand::NotActive))
        );
        assert_eq!(layer.settle(id), Ok(290));
        assert_eq!(layer.balance(), 1_280);
    }

    #[test]
    fn test_crash_cash_out() {
        let mut layer = create_layer(1_000);
        // Crash point 1.98.
        let mut draws = FixedDraws::new([0.5]);
        let id = layer
            .start_session(GameParams::Crash, 100, &mut draws)
            .unwrap();
        assert_eq!(
            layer.advance(id, PlayerInput::CashOut),
            Err(GameError::InvalidCommand(InvalidCommand::NotActive))
        );

        let view = layer.tick(5_000, &mut draws).unwrap();
        assert!(matches!(view.phase, CrashPhase::Flying { .. }));
        let view = layer.tick(5_000, &mut draws).unwrap();
        assert_eq!(view.multiplier, 134);

        let session = layer.advance(id, PlayerInput::CashOut).unwrap();
        assert_eq!(session.status, SessionStatus::CashedOut);
        assert_eq!(session.payout, 134);
        assert_eq!(
            layer.advance(id, PlayerInput::CashOut),
            Err(GameError::InvalidCommand(InvalidCommand::NotActive))
        );

        // The round flies on without the bet.
        layer.tick(10_000, &mut draws).unwrap();
        assert_eq!(layer.settle(id), Ok(134));
        assert_eq!(layer.balance(), 1_034);
    }

    #[test]
    fn test_crash_loss_and_closed_betting() {
        let mut layer = create_layer(1_000);
        let mut draws = FixedDraws::new([0.5]);
        let id = layer
            .start_session(GameParams::Crash, 100, &mut draws)
            .unwrap();
        layer.tick(5_000, &mut draws).unwrap();

        let view = layer.tick(12_000, &mut draws).unwrap();
        assert!(matches!(view.phase, CrashPhase::Crashed { .. }));
        assert_eq!(view.multiplier, 198);
        let session = layer.session(id).unwrap();
        assert_eq!(session.status, SessionStatus::Lost);
        assert!(session.settled);
        assert_eq!(layer.balance(), 900);

        // The pause keeps betting closed until the next round.
        assert_eq!(
            layer.start_session(GameParams::Crash, 100, &mut draws),
            Err(GameError::InvalidCommand(InvalidCommand::BettingClosed))
        );
        let view = layer.tick(3_000, &mut draws).unwrap();
        assert_eq!(view.round, 2);
        assert!(layer
            .start_session(GameParams::Crash, 100, &mut draws)
            .is_ok());
    }

    #[test]
    fn test_crash_loss_needs_no_write() {
        let mut layer = create_flaky_layer(1_000);
        let mut draws = FixedDraws::new([0.5]);
        let mut chops = FixedDraws::new([0.9]);
        let id = layer
            .start_session(GameParams::Crash, 100, &mut draws)
            .unwrap();
        layer.tick(5_000, &mut draws).unwrap();
        layer.start_farming(FarmingGame::Lumberjack).unwrap();
        for _ in 0..3 {
            layer
                .farm(FarmingInput::Chop(Side::Left), &mut chops)
                .unwrap();
        }
        assert!(layer.farming().unwrap().combo > 1.5);

        layer.store_mut().fail_writes(true);
        let view = layer.tick(12_000, &mut draws).unwrap();
        assert!(matches!(view.phase, CrashPhase::Crashed { .. }));
        let session = layer.session(id).unwrap();
        assert_eq!(session.status, SessionStatus::Lost);
        assert!(session.settled);
        // The same tick still decayed the farming combo.
        assert_eq!(layer.farming().unwrap().combo, 1.0);
        assert_eq!(layer.balance(), 900);
    }

    #[test]
    fn test_instant_crash_loses_at_launch() {
        let mut layer = create_layer(1_000);
        let mut draws = FixedDraws::new([0.0]);
        let id = layer
            .start_session(GameParams::Crash, 100, &mut draws)
            .unwrap();
        layer.tick(5_000, &mut draws).unwrap();
        assert_eq!(layer.session(id).unwrap().status, SessionStatus::Lost);
        assert_eq!(layer.balance(), 900);
    }

    #[test]
    fn test_lumberjack_banks_once() {
        let mut layer = create_layer(1_000);
        // No branches ever grow.
        let mut draws = FixedDraws::new([0.9]);
        layer.start_farming(FarmingGame::Lumberjack).unwrap();
        for _ in 0..10 {
            layer
                .farm(FarmingInput::Chop(Side::Left), &mut draws)
                .unwrap();
        }
        assert_eq!(
            layer.start_farming(FarmingGame::KeepieUppie),
            Err(GameError::FarmingInProgress)
        );
        assert_eq!(
            layer.farm(FarmingInput::Tap, &mut draws),
            Err(GameError::InvalidCommand(InvalidCommand::UnsupportedInput))
        );

        let view = layer.farm(FarmingInput::Quit, &mut draws).unwrap();
        assert!(view.over);
        assert_eq!(view.credited, Some(1));
        assert_eq!(layer.balance(), 1_001);

        assert_eq!(
            layer.farm(FarmingInput::Quit, &mut draws),
            Err(GameError::InvalidCommand(InvalidCommand::NotActive))
        );
        layer.tick(1_000, &mut draws).unwrap();
        assert_eq!(layer.balance(), 1_001);
    }

    #[test]
    fn test_keepie_uppie_ends_on_tick() {
        let mut layer = create_layer(1_000);
        let mut draws = FixedDraws::new([0.5]);
        layer.start_farming(FarmingGame::KeepieUppie).unwrap();
        for _ in 0..5 {
            layer.tick(100, &mut draws).unwrap();
            layer.farm(FarmingInput::Tap, &mut draws).unwrap();
        }
        // 0.5 × (1.0 + 1.2 + 1.4 + 1.6 + 1.8)
        let view = layer.farming().unwrap();
        assert!((view.total - 3.5).abs() < 1e-9);
        assert!(!view.over);

        layer.tick(5_000, &mut draws).unwrap();
        let view = layer.farming().unwrap();
        assert!(view.over);
        assert_eq!(view.credited, Some(3));
        assert_eq!(layer.balance(), 1_003);

        // A finished session can be replaced.
        layer.start_farming(FarmingGame::KeepieUppie).unwrap();
        layer.tick(5_000, &mut draws).unwrap();
        assert_eq!(layer.farming().unwrap().credited, Some(0));
        assert_eq!(layer.balance(), 1_003);
    }

    #[test]
    fn test_farming_runs_alongside_wagering() {
        let mut layer = create_layer(1_000);
        let id = layer
            .start_session(GameParams::Mines { mines: 3 }, 100, &mut last_cells())
            .unwrap();
        layer.start_farming(FarmingGame::Lumberjack).unwrap();
        layer
            .farm(FarmingInput::Chop(Side::Right), &mut FixedDraws::new([0.9]))
            .unwrap();
        layer.advance(id, PlayerInput::Reveal { cell: 0 }).unwrap();
        assert_eq!(layer.active_session().map(|view| view.id), Some(id));
    }

    #[test]
    fn test_failed_farming_credit_is_retried() {
        let mut layer = create_flaky_layer(1_000);
        let mut draws = FixedDraws::new([0.9]);
        layer.start_farming(FarmingGame::Lumberjack).unwrap();
        for _ in 0..10 {
            layer
                .farm(FarmingInput::Chop(Side::Left), &mut draws)
                .unwrap();
        }

        layer.store_mut().fail_writes(true);
        assert!(matches!(
            layer.farm(FarmingInput::Quit, &mut draws),
            Err(GameError::Storage(_))
        ));
        assert_eq!(layer.farming().unwrap().credited, None);
        assert_eq!(layer.balance(), 1_000);

        layer.store_mut().fail_writes(false);
        layer.tick(0, &mut draws).unwrap();
        assert_eq!(layer.farming().unwrap().credited, Some(1));
        assert_eq!(layer.balance(), 1_001);
    }

    #[test]
    fn test_failed_stake_debit_creates_nothing() {
        let mut layer = create_flaky_layer(1_000);
        layer.store_mut().fail_writes(true);
        assert!(matches!(
            layer.start_session(GameParams::Mines { mines: 3 }, 100, &mut last_cells()),
            Err(GameError::Storage(_))
        ));
        assert!(layer.active_session().is_none());
        assert_eq!(layer.balance(), 1_000);
    }

    #[test]
    fn test_failed_settle_credit_is_retried() {
        let mut layer = create_flaky_layer(1_000);
        let id = layer
            .start_session(
                GameParams::Roulette {
                    target: RouletteTarget::Red,
                },
                10,
                &mut pocket_draw(2),
            )
            .unwrap();
        assert_eq!(layer.balance(), 990);

        layer.store_mut().fail_writes(true);
        assert!(matches!(layer.settle(id), Err(GameError::Storage(_))));
        let view = layer.session(id).unwrap();
        assert_eq!(view.status, SessionStatus::Won);
        assert!(!view.settled);
        assert_eq!(layer.active_session().map(|view| view.id), Some(id));
        assert_eq!(layer.balance(), 990);

        layer.store_mut().fail_writes(false);
        assert_eq!(layer.settle(id), Ok(20));
        assert_eq!(
            layer.settle(id),
            Err(GameError::InvalidCommand(InvalidCommand::AlreadySettled))
        );
        assert_eq!(layer.balance(), 1_010);
        let stored = layer.ledger().store().load(&test_user()).unwrap().unwrap();
        assert_eq!(stored.balance, 1_010);
    }

    #[test]
    fn test_settlement_at_max_balance_saturates() {
        let mut layer = create_layer(1_000);
        layer.set_balance(u64::MAX).unwrap();
        let id = layer
            .start_session(
                GameParams::Roulette {
                    target: RouletteTarget::Red,
                },
                1,
                &mut pocket_draw(2),
            )
            .unwrap();
        assert_eq!(layer.settle(id), Ok(2));
        assert_eq!(layer.balance(), u64::MAX);
        assert!(layer.active_session().is_none());

        // The engine is not wedged: new sessions and admin calls go through.
        let id = layer
            .start_session(GameParams::Mines { mines: 3 }, 100, &mut last_cells())
            .unwrap();
        assert_eq!(layer.forfeit(id), Ok(0));
        assert_eq!(layer.claim_daily_bonus(HOUR), Ok(u64::MAX));
        assert_eq!(layer.reset_balance(), Ok(100));
    }

    #[test]
    fn test_bonus_messages() {
        let mut layer = create_layer(1_000);
        let t0 = 10 * HOUR;
        let claim = layer.claim_daily_bonus_message(t0);
        assert!(claim.success);
        assert_eq!(claim.message, "claimed 100 coins");
        assert_eq!(layer.balance(), 1_100);
        assert_eq!(layer.last_bonus_claimed_at(), Some(t0));

        let claim = layer.claim_daily_bonus_message(t0 + HOUR / 2);
        assert!(!claim.success);
        assert_eq!(claim.message, "Wait 30 mins");
        assert_eq!(layer.bonus_remaining_minutes(t0 + HOUR / 2), 30);
        assert_eq!(layer.balance(), 1_100);

        assert_eq!(
            layer.claim_daily_bonus(t0 + HOUR - 1),
            Err(GameError::CooldownActive {
                remaining_minutes: 1
            })
        );
        assert_eq!(layer.claim_daily_bonus(t0 + HOUR), Ok(1_200));
        assert_eq!(layer.bonus_remaining_ms(t0 + HOUR), HOUR);
    }

    #[test]
    fn test_admin_refused_while_unsettled() {
        let mut layer = create_layer(1_000);
        let id = layer
            .start_session(GameParams::Mines { mines: 3 }, 100, &mut last_cells())
            .unwrap();
        assert_eq!(layer.reset_balance(), Err(GameError::SessionInProgress(id)));
        assert_eq!(layer.set_balance(5), Err(GameError::SessionInProgress(id)));
        assert_eq!(layer.balance(), 900);

        layer.forfeit(id).unwrap();
        assert_eq!(layer.reset_balance(), Ok(100));
        assert_eq!(layer.set_balance(5_000), Ok(5_000));
        assert_eq!(layer.balance(), 5_000);
    }

    #[test]
    fn test_settled_history_is_bounded() {
        let mut layer = create_layer(1_000);
        let mut ids = Vec::new();
        for _ in 0..40 {
            let id = layer
                .start_session(
                    GameParams::Roulette {
                        target: RouletteTarget::Red,
                    },
                    1,
                    &mut pocket_draw(2),
                )
                .unwrap();
            layer.settle(id).unwrap();
            ids.push(id);
        }
        assert!(layer.session(ids[0]).is_none());
        assert!(layer.session(ids[39]).is_some());
        assert_eq!(layer.balance(), 1_040);
    }

    #[test]
    fn test_file_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::default();
        {
            let store = FileStore::open(dir.path()).unwrap();
            let mut layer = Layer::open(store, test_user(), config.clone()).unwrap();
            assert_eq!(layer.balance(), 1_000);
            layer.claim_daily_bonus(HOUR).unwrap();
            let id = layer
                .start_session(
                    GameParams::Roulette {
                        target: RouletteTarget::Red,
                    },
                    10,
                    &mut pocket_draw(1),
                )
                .unwrap();
            layer.settle(id).unwrap();
            assert_eq!(layer.balance(), 1_090);
        }

        let store = FileStore::open(dir.path()).unwrap();
        let mut layer = Layer::open(store, test_user(), config).unwrap();
        assert_eq!(layer.balance(), 1_090);
        assert_eq!(layer.last_bonus_claimed_at(), Some(HOUR));
        assert!(!layer.claim_daily_bonus_message(HOUR + 1).success);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig {
            starting_balance: 0,
            ..EngineConfig::default()
        };
        let result = Layer::open(crate::Memory::default(), test_user(), config);
        assert!(result.is_err());
    }
}
