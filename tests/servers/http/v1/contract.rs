mod for_all_requests {
    use swarm_canary_contrib_bencode::{BDecodeOpt, BencodeRef};
    use swarm_canary_test_helpers::configuration;

    use crate::servers::environment::Environment;
    use crate::servers::http::client::Client;

    #[tokio::test]
    async fn it_should_answer_an_unknown_path_with_not_found() {
        let env = Environment::new(configuration::ephemeral()).await;

        let response = Client::new(env.tracker_address()).get("scrape").await;

        assert_eq!(response.status(), 404);

        env.stop().await;
    }

    #[tokio::test]
    async fn it_should_answer_an_announce_without_params_with_a_bencoded_failure() {
        let env = Environment::new(configuration::ephemeral()).await;

        let response = Client::new(env.tracker_address()).get("announce").await;

        assert_eq!(response.status(), 400);

        let body = response.bytes().await.unwrap();
        let failure = BencodeRef::decode(&body, BDecodeOpt::default()).unwrap();

        assert!(failure.lookup_str(b"failure reason").is_ok());

        env.stop().await;
    }
}

mod receiving_an_announce_request {
    use std::net::{IpAddr, Ipv4Addr};

    use swarm_canary_contrib_bencode::{BDecodeOpt, BencodeRef};
    use swarm_canary_swarm_repository::repository::Repository;
    use swarm_canary_test_helpers::{configuration, random};

    use crate::servers::environment::Environment;
    use crate::servers::http::client::Client;
    use crate::servers::http::requests::Query;

    #[tokio::test]
    async fn it_should_refuse_an_info_hash_of_nineteen_bytes_without_registering_or_reporting_it() {
        let mut env = Environment::new(configuration::ephemeral_with_expected_addresses(vec![])).await;

        let query = Query::new(&env.canary.info_hash(), &random::peer_id(), 6881).with_info_hash_bytes(&[0x61; 19]);

        let response = Client::new(env.tracker_address()).announce(&query).await;

        assert_eq!(response.status(), 400);

        let body = response.bytes().await.unwrap();
        let failure = BencodeRef::decode(&body, BDecodeOpt::default()).unwrap();
        assert!(failure.lookup_str(b"failure reason").unwrap().contains("info_hash"));

        assert!(env.canary.swarms.get(&env.canary.info_hash()).is_none());
        assert!(env.notifications.is_quiet().await);

        env.stop().await;
    }

    #[tokio::test]
    async fn it_should_list_its_own_peer_listener_first_in_the_normal_peer_list() {
        let env = Environment::new(configuration::ephemeral()).await;

        let query = Query::new(&env.canary.info_hash(), &random::peer_id(), 6881);

        let response = Client::new(env.tracker_address()).announce(&query).await;

        assert_eq!(response.status(), 200);

        let body = response.bytes().await.unwrap();
        let announce = BencodeRef::decode(&body, BDecodeOpt::default()).unwrap();

        assert_eq!(announce.lookup_int(b"interval").unwrap(), 300);
        assert_eq!(announce.lookup_int(b"min interval").unwrap(), 120);
        assert_eq!(announce.lookup_int(b"complete").unwrap(), 1);
        assert_eq!(announce.lookup_int(b"incomplete").unwrap(), 1);
        assert_eq!(announce.lookup_str(b"warning message").unwrap(), "Your IP is 127.0.0.1");

        let peers = announce.lookup_list(b"peers").unwrap();
        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].lookup_bytes(b"peer id").unwrap(), &env.canary.own_peer_id().0[..]);
        assert_eq!(peers[0].lookup_str(b"ip").unwrap(), "127.0.0.1");
        assert_eq!(
            peers[0].lookup_int(b"port").unwrap(),
            i64::from(env.listener_address().port())
        );

        env.stop().await;
    }

    #[tokio::test]
    async fn it_should_advertise_its_own_peer_listener_on_the_address_the_client_reached_it_at() {
        let mut config = configuration::ephemeral();
        config.core.net.host = "canary.example.org".to_owned();
        let env = Environment::new(config).await;

        let query = Query::new(&env.canary.info_hash(), &random::peer_id(), 6881).with_compact(1);

        let response = Client::new(env.tracker_address()).announce(&query).await;

        let body = response.bytes().await.unwrap();
        let announce = BencodeRef::decode(&body, BDecodeOpt::default()).unwrap();

        // The tracker is bound to loopback, so that is where the client reached it.
        let mut own = Ipv4Addr::LOCALHOST.octets().to_vec();
        own.extend_from_slice(&env.listener_address().port().to_be_bytes());

        assert_eq!(announce.lookup_bytes(b"peers").unwrap(), &own[..]);

        env.stop().await;
    }

    #[tokio::test]
    async fn it_should_pack_its_own_peer_listener_in_the_compact_peer_list() {
        let env = Environment::new(configuration::ephemeral()).await;

        let query = Query::new(&env.canary.info_hash(), &random::peer_id(), 6881).with_compact(1);

        let response = Client::new(env.tracker_address()).announce(&query).await;

        assert_eq!(response.status(), 200);

        let body = response.bytes().await.unwrap();
        let announce = BencodeRef::decode(&body, BDecodeOpt::default()).unwrap();

        let mut own = Ipv4Addr::LOCALHOST.octets().to_vec();
        own.extend_from_slice(&env.listener_address().port().to_be_bytes());

        assert_eq!(announce.lookup_bytes(b"peers").unwrap(), &own[..]);
        assert!(announce.lookup_bytes(b"peers6").unwrap().is_empty());

        env.stop().await;
    }

    #[tokio::test]
    async fn it_should_list_the_other_peers_of_the_swarm() {
        let env = Environment::new(configuration::ephemeral()).await;
        let client = Client::new(env.tracker_address());

        client
            .announce(&Query::new(&env.canary.info_hash(), &random::peer_id(), 6881))
            .await;

        let response = client
            .announce(&Query::new(&env.canary.info_hash(), &random::peer_id(), 6882))
            .await;

        let body = response.bytes().await.unwrap();
        let announce = BencodeRef::decode(&body, BDecodeOpt::default()).unwrap();

        let peers = announce.lookup_list(b"peers").unwrap();
        assert_eq!(peers.len(), 2);
        assert_eq!(peers[1].lookup_int(b"port").unwrap(), 6881);

        env.stop().await;
    }

    #[tokio::test]
    async fn it_should_answer_an_untracked_hash_with_an_empty_swarm() {
        let mut env = Environment::new(configuration::ephemeral_with_expected_addresses(vec![])).await;

        let query = Query::new(&random::info_hash(), &random::peer_id(), 6881);

        let response = Client::new(env.tracker_address()).announce(&query).await;

        let body = response.bytes().await.unwrap();
        let announce = BencodeRef::decode(&body, BDecodeOpt::default()).unwrap();

        assert!(announce.lookup_list(b"peers").unwrap().is_empty());
        assert_eq!(announce.lookup_int(b"complete").unwrap(), 0);

        assert!(env.notifications.is_quiet().await);

        env.stop().await;
    }

    #[tokio::test]
    async fn it_should_notify_an_unexpected_address() {
        let mut env = Environment::new(configuration::ephemeral_with_expected_addresses(vec![])).await;

        let query = Query::new(&env.canary.info_hash(), &random::peer_id(), 6881);

        Client::new(env.tracker_address()).announce(&query).await;

        assert_eq!(env.notifications.next().await, Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));

        env.stop().await;
    }

    #[tokio::test]
    async fn it_should_notify_an_unexpected_address_once_per_cooldown() {
        let mut env = Environment::new(configuration::ephemeral_with_expected_addresses(vec![])).await;
        let client = Client::new(env.tracker_address());

        let query = Query::new(&env.canary.info_hash(), &random::peer_id(), 6881);

        client.announce(&query).await;
        client.announce(&query).await;

        assert!(env.notifications.next().await.is_some());
        assert!(env.notifications.is_quiet().await);

        env.stop().await;
    }

    #[tokio::test]
    async fn it_should_not_notify_an_expected_address() {
        let mut env = Environment::new(configuration::ephemeral()).await;

        let query = Query::new(&env.canary.info_hash(), &random::peer_id(), 6881);

        Client::new(env.tracker_address()).announce(&query).await;

        assert!(env.notifications.is_quiet().await);

        env.stop().await;
    }
}
