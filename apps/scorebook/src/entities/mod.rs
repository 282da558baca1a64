pub mod courses;
pub mod holes;
pub mod players;
pub mod round_segments;
pub mod rounds;

pub use courses::Entity as Courses;
pub use courses::Model as Course;
pub use holes::Entity as Holes;
pub use holes::Model as Hole;
pub use players::Entity as Players;
pub use players::Model as Player;
pub use round_segments::Entity as RoundSegments;
pub use round_segments::Model as RoundSegment;
pub use rounds::Entity as Rounds;
pub use rounds::Model as Round;
