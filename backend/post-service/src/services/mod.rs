/// Business logic layer for post-service
///
/// This module provides high-level operations:
/// - Post service: lookup, listing, news feed, create/update/delete, voting
/// - Vote transitions: the up/down/reset state machine used by voting
/// - Follow service: follower edges feeding the news feed
pub mod follows;
pub mod posts;
pub mod votes;

// Re-export commonly used services
pub use follows::FollowService;
pub use posts::PostService;
pub use votes::VoteAction;
