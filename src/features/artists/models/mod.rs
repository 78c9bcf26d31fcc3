mod artist;

pub use artist::Artist;
