use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use rstest::{fixture, rstest};
use swarm_canary_configuration::SwarmPolicy;
use swarm_canary_primitives::announce_event::AnnounceEvent;
use swarm_canary_primitives::info_hash::InfoHash;
use swarm_canary_primitives::swarm_metadata::SwarmMetadata;
use swarm_canary_primitives::{peer, DurationSinceUnixEpoch};
use swarm_canary_swarm_repository::entry::Entry as _;
use swarm_canary_swarm_repository::repository::rw_lock_std::RwLockStd;
use swarm_canary_swarm_repository::repository::Repository as _;
use swarm_canary_swarm_repository::SwarmsRwLockStd;

use crate::common::swarm_peer_builder::{a_completed_peer, a_started_peer};

const TTL: u64 = 600;

#[fixture]
fn repo() -> SwarmsRwLockStd {
    RwLockStd::new(SwarmPolicy { peer_ttl: 600 })
}

#[fixture]
fn tracked() -> InfoHash {
    InfoHash([0x3b; 20])
}

type Peers = Vec<peer::Peer>;

#[fixture]
fn empty() -> Peers {
    vec![]
}

#[fixture]
fn started() -> Peers {
    vec![a_started_peer(1, 1_000)]
}

#[fixture]
fn completed() -> Peers {
    vec![a_completed_peer(2, 1_000)]
}

#[fixture]
fn three() -> Peers {
    vec![a_started_peer(3, 1_000), a_completed_peer(1, 1_000), a_started_peer(2, 1_000)]
}

#[fixture]
fn many() -> Peers {
    (1..=80).rev().map(|id| a_started_peer(id, 1_000)).collect()
}

fn at(secs: u64) -> DurationSinceUnixEpoch {
    Duration::from_secs(secs)
}

fn make(repo: &SwarmsRwLockStd, info_hash: &InfoHash, peers: &Peers) {
    for peer in peers {
        repo.register(info_hash, peer, peer.updated);
    }
}

#[rstest]
#[case::empty(empty())]
#[case::started(started())]
#[case::completed(completed())]
#[case::three(three())]
#[case::many(many())]
fn it_should_list_the_registered_peers_ordered_by_peer_id(repo: SwarmsRwLockStd, tracked: InfoHash, #[case] peers: Peers) {
    make(&repo, &tracked, &peers);

    let listed = repo.list(&tracked, None, usize::MAX, at(1_000));

    assert_eq!(listed.len(), peers.len());
    assert!(listed.windows(2).all(|w| w[0].peer_id < w[1].peer_id));
}

#[rstest]
#[case::empty(empty())]
#[case::started(started())]
#[case::three(three())]
#[case::many(many())]
fn it_should_list_at_most_the_requested_number_of_peers(
    repo: SwarmsRwLockStd,
    tracked: InfoHash,
    #[case] peers: Peers,
    #[values(0, 1, 50)] max: usize,
) {
    make(&repo, &tracked, &peers);

    let listed = repo.list(&tracked, None, max, at(1_000));

    assert_eq!(listed.len(), peers.len().min(max));
}

#[rstest]
#[case::started(started())]
#[case::three(three())]
#[case::many(many())]
fn it_should_leave_the_requesting_peer_out_of_the_list(repo: SwarmsRwLockStd, tracked: InfoHash, #[case] peers: Peers) {
    make(&repo, &tracked, &peers);

    let requester = peers[0].peer_id;

    let listed = repo.list(&tracked, Some(&requester), usize::MAX, at(1_000));

    assert_eq!(listed.len(), peers.len() - 1);
    assert!(listed.iter().all(|peer| peer.peer_id != requester));
}

#[rstest]
fn it_should_return_the_previous_record_when_the_same_peer_id_moves(repo: SwarmsRwLockStd, tracked: InfoHash) {
    let first = a_started_peer(1, 1_000);
    let mut moved = a_started_peer(1, 1_010);
    moved.change_ip(&IpAddr::V4(Ipv4Addr::new(198, 51, 100, 9)));

    assert!(repo.register(&tracked, &first, at(1_000)).is_none());

    let previous = repo.register(&tracked, &moved, at(1_010));

    assert_eq!(previous.map(|p| p.peer_addr), Some(first.peer_addr));
    assert_eq!(repo.get(&tracked).map(|swarm| swarm.get_peers_len()), Some(1));
}

#[rstest]
fn it_should_keep_the_swarms_of_different_hashes_apart(repo: SwarmsRwLockStd, tracked: InfoHash) {
    let other = InfoHash([0x11; 20]);

    repo.register(&tracked, &a_started_peer(1, 1_000), at(1_000));
    repo.register(&other, &a_started_peer(2, 1_000), at(1_000));

    let listed = repo.list(&tracked, None, usize::MAX, at(1_000));

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].peer_id, peer::Id::from(1));
}

#[rstest]
fn a_record_not_refreshed_within_the_ttl_should_not_be_listed(repo: SwarmsRwLockStd, tracked: InfoHash) {
    repo.register(&tracked, &a_started_peer(1, 1_000), at(1_000));
    repo.register(&tracked, &a_started_peer(2, 1_300), at(1_300));

    let listed = repo.list(&tracked, None, usize::MAX, at(1_000 + TTL));

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].peer_id, peer::Id::from(2));
}

#[rstest]
fn a_refreshed_record_should_survive_the_ttl_of_its_first_registration(repo: SwarmsRwLockStd, tracked: InfoHash) {
    repo.register(&tracked, &a_started_peer(1, 1_000), at(1_000));
    repo.register(&tracked, &a_started_peer(1, 1_500), at(1_500));

    let listed = repo.list(&tracked, None, usize::MAX, at(1_000 + TTL));

    assert_eq!(listed.len(), 1);
}

#[rstest]
fn registering_should_expire_the_stale_records_first(repo: SwarmsRwLockStd, tracked: InfoHash) {
    repo.register(&tracked, &a_started_peer(1, 1_000), at(1_000));

    let previous = repo.register(&tracked, &a_started_peer(1, 2_000), at(2_000));

    assert!(previous.is_none());
}

#[rstest]
fn a_swarm_left_without_peers_should_be_removed(repo: SwarmsRwLockStd, tracked: InfoHash) {
    repo.register(&tracked, &a_started_peer(1, 1_000), at(1_000));

    repo.expire(at(1_000 + TTL));

    assert!(repo.get(&tracked).is_none());
}

#[rstest]
fn a_peer_that_stopped_should_leave_the_swarm(repo: SwarmsRwLockStd, tracked: InfoHash) {
    let mut peer = a_started_peer(1, 1_000);
    repo.register(&tracked, &peer, at(1_000));

    peer.event = AnnounceEvent::Stopped;
    repo.register(&tracked, &peer, at(1_001));

    assert!(repo.get(&tracked).is_none());
    assert!(repo.list(&tracked, None, usize::MAX, at(1_001)).is_empty());
}

#[rstest]
fn nothing_should_expire_before_a_whole_ttl_has_passed_since_the_epoch(repo: SwarmsRwLockStd, tracked: InfoHash) {
    repo.register(&tracked, &a_started_peer(1, 0), at(0));

    assert_eq!(repo.list(&tracked, None, usize::MAX, at(TTL - 1)).len(), 1);
}

#[rstest]
fn the_swarm_metadata_should_count_seeders_and_leechers(repo: SwarmsRwLockStd, tracked: InfoHash, three: Peers) {
    make(&repo, &tracked, &three);

    assert_eq!(repo.get_swarm_metadata(&tracked), SwarmMetadata::new(0, 1, 2));
}

#[rstest]
fn the_swarm_metadata_of_an_unknown_hash_should_be_zeroed(repo: SwarmsRwLockStd) {
    assert_eq!(repo.get_swarm_metadata(&InfoHash([0xff; 20])), SwarmMetadata::zeroed());
}

#[rstest]
fn it_should_count_a_known_peer_completing_as_a_download(repo: SwarmsRwLockStd, tracked: InfoHash) {
    repo.register(&tracked, &a_started_peer(1, 1_000), at(1_000));
    repo.register(&tracked, &a_completed_peer(1, 1_100), at(1_100));

    assert_eq!(repo.get_swarm_metadata(&tracked).downloaded, 1);
}

#[rstest]
fn a_handshake_peer_on_a_new_address_should_be_listed_with_it(repo: SwarmsRwLockStd, tracked: InfoHash) {
    let address = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 44)), 51_413);
    let mut peer = a_started_peer(7, 1_000);
    peer.peer_addr = address;
    peer.event = AnnounceEvent::None;

    repo.register(&tracked, &peer, at(1_000));

    let listed = repo.list(&tracked, None, usize::MAX, at(1_000));
    assert_eq!(listed[0].peer_addr, address);
}
