pub mod batter;
pub mod bowler;
pub mod commentary;
pub mod extras;
pub mod figures;
pub mod innings;
pub mod slot;
pub mod team;
pub mod wicket;
