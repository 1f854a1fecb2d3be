use patience_core::{
    build_pile, Board, BuildSetting, BuildStrategy, Card, CardView, History, Move, PileArchetype,
    PileConfig, PileId, Rank, ScoredMove, Suit, TokenContext,
};

fn card(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

/// A board holding one scratch stock that feeds the piles under test, plus
/// the history driving it.
struct Rig {
    board: Board,
    history: History,
    context: TokenContext,
}

impl Rig {
    fn new() -> Self {
        Self {
            board: Board::new(),
            history: History::new(),
            context: TokenContext::new(),
        }
    }

    fn add(&mut self, archetype: PileArchetype, config: PileConfig) -> PileId {
        let pile = build_pile(archetype, &config).expect("assembly");
        self.board.add_pile(pile)
    }

    /// Fills `dest` with `cards` (bottom of the pile first) through the
    /// normal initial-fill path, from a throwaway stock.
    fn fill(&mut self, dest: PileId, mut cards: Vec<Card>) {
        assert_eq!(cards.len(), self.board.pile(dest).initial_count());
        let token = self.context.mint("scratch");
        let stock = self.add(
            PileArchetype::Stock,
            PileConfig {
                association_tokens: Some(vec![token]),
                ..PileConfig::default()
            },
        );
        cards.reverse();
        self.board.receive_deck(stock, cards);
        let fill = self.board.create_initial_deal(stock, &[dest]);
        self.history
            .execute(&mut self.board, ScoredMove::auxiliary(fill));
    }

    fn execute(&mut self, mv: Move) {
        self.history
            .execute(&mut self.board, ScoredMove::meaningful(mv));
    }
}

fn file_config(initial_count: usize) -> PileConfig {
    PileConfig {
        initial_count: Some(initial_count),
        initial_shown: Some(1),
        strategy: Some(BuildStrategy::alternating_color(BuildSetting::descending())),
        ..PileConfig::default()
    }
}

#[test]
fn cell_takes_one_card_while_empty() {
    let mut rig = Rig::new();
    let file = rig.add(PileArchetype::File, file_config(2));
    let cell = rig.add(PileArchetype::Cell, PileConfig::default());
    rig.fill(
        file,
        vec![card(Suit::Spades, Rank::Nine), card(Suit::Hearts, Rank::Five)],
    );

    assert!(rig.board.create_transfer(file, cell, 2).is_none());
    let mv = rig.board.create_transfer(file, cell, 1).expect("cell move");
    rig.execute(mv);
    assert_eq!(
        rig.board.pile(cell).top_card(),
        CardView::Up(card(Suit::Hearts, Rank::Five))
    );

    // Occupied cells refuse everything.
    assert!(rig.board.create_transfer(file, cell, 1).is_none());
}

#[test]
fn foundation_takes_single_cards_in_suit_order() {
    let mut rig = Rig::new();
    let file = rig.add(PileArchetype::File, file_config(2));
    let foundation = rig.add(
        PileArchetype::Foundation,
        PileConfig {
            correspondent_suit: Some(Suit::Spades),
            ..PileConfig::default()
        },
    );
    rig.fill(
        file,
        vec![card(Suit::Spades, Rank::Two), card(Suit::Spades, Rank::Ace)],
    );

    let mv = rig
        .board
        .create_transfer(file, foundation, 1)
        .expect("ace up");
    rig.execute(mv);
    let mv = rig
        .board
        .create_transfer(file, foundation, 1)
        .expect("two up");
    rig.execute(mv);
    assert_eq!(rig.board.pile(foundation).len(), 2);

    // Wrong suit never lands.
    let other = rig.add(PileArchetype::File, file_config(1));
    rig.fill(other, vec![card(Suit::Hearts, Rank::Three)]);
    assert!(rig.board.create_transfer(other, foundation, 1).is_none());
}

#[test]
fn built_run_moves_whole_and_hidden_cards_stay_put() {
    let mut rig = Rig::new();
    let file = rig.add(PileArchetype::File, file_config(1));
    let feeder = rig.add(PileArchetype::File, file_config(1));
    let target = rig.add(PileArchetype::File, file_config(2));
    rig.fill(file, vec![card(Suit::Spades, Rank::Six)]);
    rig.fill(feeder, vec![card(Suit::Hearts, Rank::Five)]);
    rig.fill(
        target,
        vec![card(Suit::Clubs, Rank::Ten), card(Suit::Hearts, Rank::Seven)],
    );

    let mv = rig.board.create_transfer(feeder, file, 1).expect("build");
    rig.execute(mv);
    assert_eq!(rig.board.pile(file).available_index(), 0);

    // The whole two-card run relocates onto the red seven in one move.
    let mv = rig.board.create_transfer(file, target, 2).expect("run move");
    rig.execute(mv);
    assert_eq!(rig.board.pile(file).len(), 0);
    assert_eq!(rig.board.pile(target).len(), 4);
    assert_eq!(
        rig.board.pile(target).top_card(),
        CardView::Up(card(Suit::Hearts, Rank::Five))
    );

    // The run grew downward through the face-up seven, so three cards may
    // move again, but the hidden prefix below it may not.
    assert_eq!(rig.board.pile(target).get_card(0), CardView::FaceDown);
    assert!(rig.board.create_transfer(target, file, 3).is_some());
    assert!(rig.board.create_transfer(target, file, 4).is_none());
}

#[test]
fn extraction_at_the_boundary_flips_and_reevaluates() {
    let mut rig = Rig::new();
    let file = rig.add(PileArchetype::File, file_config(2));
    let cell = rig.add(PileArchetype::Cell, PileConfig::default());
    rig.fill(
        file,
        vec![card(Suit::Clubs, Rank::Nine), card(Suit::Hearts, Rank::Five)],
    );
    assert_eq!(rig.board.pile(file).partition_index(), 1);

    let mv = rig.board.create_transfer(file, cell, 1).expect("to cell");
    match &mv {
        Move::Transfer { actions, .. } => assert!(!actions.is_empty()),
        other => panic!("unexpected move {other:?}"),
    }
    rig.execute(mv);

    // The hidden nine flipped up and is the new moveable tail.
    let pile = rig.board.pile(file);
    assert_eq!(pile.len(), 1);
    assert_eq!(pile.partition_index(), 0);
    assert_eq!(pile.available_index(), 0);
    assert_eq!(pile.get_card(0), CardView::Up(card(Suit::Clubs, Rank::Nine)));

    // Undo restores the facing as well as the cards.
    rig.history.undo(&mut rig.board);
    let pile = rig.board.pile(file);
    assert_eq!(pile.len(), 2);
    assert_eq!(pile.partition_index(), 1);
    assert_eq!(pile.get_card(0), CardView::FaceDown);
}

#[test]
fn legal_run_keeps_available_at_run_start() {
    let mut rig = Rig::new();
    let file = rig.add(PileArchetype::File, file_config(1));
    let feeder = rig.add(PileArchetype::File, file_config(1));
    rig.fill(file, vec![card(Suit::Hearts, Rank::Five)]);
    rig.fill(feeder, vec![card(Suit::Spades, Rank::Four)]);

    let mv = rig.board.create_transfer(feeder, file, 1).expect("build");
    rig.execute(mv);
    let pile = rig.board.pile(file);
    assert_eq!(pile.len(), 2);
    assert_eq!(pile.available_index(), 0);
    assert_eq!(pile.evaluate_available_index(1), 0);
}

#[test]
fn forced_addition_starts_a_new_run_at_the_top_card() {
    let mut rig = Rig::new();
    let file = rig.add(PileArchetype::File, file_config(1));
    let feeder = rig.add(PileArchetype::File, file_config(1));
    let intruder = rig.add(PileArchetype::File, file_config(1));
    rig.fill(file, vec![card(Suit::Hearts, Rank::Five)]);
    rig.fill(feeder, vec![card(Suit::Spades, Rank::Four)]);
    rig.fill(intruder, vec![card(Suit::Diamonds, Rank::Nine)]);

    let mv = rig.board.create_transfer(feeder, file, 1).expect("build");
    rig.execute(mv);

    // 9D does not build on 4S; the normal path refuses, force it through.
    assert!(rig.board.create_transfer(intruder, file, 1).is_none());
    let forced = rig
        .board
        .create_forced_transfer(intruder, file, 1)
        .expect("forced");
    rig.execute(forced);

    let pile = rig.board.pile(file);
    assert_eq!(pile.len(), 3);
    assert_eq!(pile.available_index(), 2);
    assert_eq!(pile.evaluate_available_index(2), 2);

    rig.history.undo(&mut rig.board);
    assert_eq!(rig.board.pile(file).available_index(), 0);
}

#[test]
fn probes_change_nothing_until_executed() {
    let mut rig = Rig::new();
    let file = rig.add(PileArchetype::File, file_config(2));
    let cell = rig.add(PileArchetype::Cell, PileConfig::default());
    rig.fill(
        file,
        vec![card(Suit::Clubs, Rank::Nine), card(Suit::Hearts, Rank::Five)],
    );

    rig.board.events.drain().count();
    let before = format!("{:?}", rig.board);

    // A successful probe and a failed one both leave the board untouched.
    let probe = rig.board.create_transfer(file, cell, 1);
    assert!(probe.is_some());
    assert!(rig.board.create_transfer(file, cell, 2).is_none());

    rig.board.events.drain().count();
    assert_eq!(format!("{:?}", rig.board), before);
}

fn spider_rig() -> (Rig, PileId, PileId, PileId) {
    let mut rig = Rig::new();
    let relocation_token = rig.context.mint("waste");
    let relocated = rig.add(PileArchetype::Waste, PileConfig::default());
    rig.board.register(relocation_token.clone(), relocated);

    let feed_token = rig.context.mint("waste");
    let feed = rig.add(PileArchetype::Waste, PileConfig::default());
    rig.board.register(feed_token.clone(), feed);

    let stock = rig.add(
        PileArchetype::Stock,
        PileConfig {
            association_tokens: Some(vec![feed_token]),
            ..PileConfig::default()
        },
    );

    let autowaste = rig.add(
        PileArchetype::FileAutowaste,
        PileConfig {
            initial_count: Some(0),
            initial_shown: Some(1),
            association_tokens: Some(vec![relocation_token]),
            auto_move_threshold: Some(13),
            ..PileConfig::default()
        },
    );

    (rig, stock, autowaste, relocated)
}

/// Deals the stock's top card to the feed waste and plays it onto the
/// autowaste file, forcing when the build rule refuses.
fn feed_autowaste(rig: &mut Rig, stock: PileId, autowaste: PileId) -> Move {
    let deal = rig.board.create_deal_move(stock).expect("deal");
    rig.history
        .execute(&mut rig.board, ScoredMove::auxiliary(deal));
    let feed = match rig.board.pile(stock).kind() {
        patience_core::PileKind::Stock { dest, .. } => rig
            .board
            .resolve(dest.as_ref().expect("stock association"))
            .expect("feed waste"),
        other => panic!("not a stock: {other:?}"),
    };
    match rig.board.create_transfer(feed, autowaste, 1) {
        Some(mv) => mv,
        None => rig
            .board
            .create_forced_transfer(feed, autowaste, 1)
            .expect("forced feed"),
    }
}

#[test]
fn completed_run_cascades_exactly_once() {
    let (mut rig, stock, autowaste, relocated) = spider_rig();

    // Deal order: K..A of spades builds the run, then an unrelated heart.
    let mut deck = vec![card(Suit::Hearts, Rank::Nine)];
    for rank in Rank::ALL {
        deck.push(card(Suit::Spades, rank));
    }
    rig.board.receive_deck(stock, deck);

    for _ in 0..13 {
        let mv = feed_autowaste(&mut rig, stock, autowaste);
        rig.execute(mv);
    }
    assert_eq!(rig.board.pile(autowaste).len(), 13);
    assert_eq!(rig.board.pile(autowaste).available_index(), 0);

    // The next addition carries exactly one nested relocation.
    let mv = feed_autowaste(&mut rig, stock, autowaste);
    let Move::Transfer { ref actions, .. } = mv else {
        panic!("unexpected move {mv:?}");
    };
    let cascades = actions
        .iter()
        .filter(|action| matches!(action, Move::Transfer { count: 13, .. }))
        .count();
    assert_eq!(cascades, 1);

    rig.execute(mv);
    assert_eq!(rig.board.pile(relocated).len(), 13);
    assert_eq!(rig.board.pile(autowaste).len(), 1);

    // The whole cascade unwinds as one transaction.
    rig.history.undo(&mut rig.board);
    assert_eq!(rig.board.pile(relocated).len(), 0);
    assert_eq!(rig.board.pile(autowaste).len(), 13);
    assert_eq!(rig.board.pile(autowaste).available_index(), 0);
}

#[test]
fn short_run_never_cascades() {
    let (mut rig, stock, autowaste, relocated) = spider_rig();

    // Only K..2: twelve cards, one short of the threshold.
    let mut deck = vec![card(Suit::Hearts, Rank::Nine)];
    for rank in &Rank::ALL[1..] {
        deck.push(card(Suit::Spades, *rank));
    }
    rig.board.receive_deck(stock, deck);

    for _ in 0..12 {
        let mv = feed_autowaste(&mut rig, stock, autowaste);
        rig.execute(mv);
    }
    assert_eq!(rig.board.pile(autowaste).available_index(), 0);

    let mv = feed_autowaste(&mut rig, stock, autowaste);
    let Move::Transfer { ref actions, .. } = mv else {
        panic!("unexpected move {mv:?}");
    };
    assert!(actions
        .iter()
        .all(|action| !matches!(action, Move::Transfer { .. })));
    rig.execute(mv);
    assert_eq!(rig.board.pile(relocated).len(), 0);
}
