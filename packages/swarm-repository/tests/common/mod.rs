pub mod swarm_peer_builder;
