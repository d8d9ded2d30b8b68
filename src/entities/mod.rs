pub mod affirmations;
pub mod daily_affirmation_items;
pub mod daily_affirmations;
pub mod daily_pile_draws;
pub mod game_scores;
pub mod journal_entries;
pub mod luck_cards;
pub mod pile_card_selections;
pub mod release_notes;
pub mod users;

pub use affirmations as affirmation_entity;
pub use affirmations::AffirmationCategory;
pub use daily_affirmation_items as daily_affirmation_item_entity;
pub use daily_affirmations as daily_affirmation_entity;
pub use daily_pile_draws as daily_pile_draw_entity;
pub use daily_pile_draws::MAX_DRAWS_PER_DAY;
pub use game_scores as game_score_entity;
pub use journal_entries as journal_entry_entity;
pub use luck_cards as luck_card_entity;
pub use pile_card_selections as pile_card_selection_entity;
pub use release_notes as release_note_entity;
pub use users as user_entity;
