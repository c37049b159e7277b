pub mod actor;
pub mod artist;
pub mod category;
pub mod genres;
pub mod movie;
pub mod performance;
pub mod question;
pub mod show;
pub mod venue;

pub use actor::{Actor, ActorChanges, NewActor};
pub use artist::{Artist, ArtistChanges, NewArtist};
pub use category::Category;
pub use movie::{Movie, MovieChanges, NewMovie};
pub use performance::Performance;
pub use question::{NewQuestion, Question};
pub use show::{NewShow, Schedule, Show, ShowListing};
pub use venue::{NewVenue, Venue, VenueChanges};
