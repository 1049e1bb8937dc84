mod receiving_a_handshake {
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    use swarm_canary::servers::peer::handshake::{Handshake, HANDSHAKE_LEN};
    use swarm_canary_contrib_bencode::{BDecodeOpt, BencodeRef};
    use swarm_canary_test_helpers::{configuration, random};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    use crate::servers::environment::Environment;
    use crate::servers::http::client::Client;
    use crate::servers::http::requests::Query;

    #[tokio::test]
    async fn it_should_reply_to_a_handshake_for_the_tracked_hash() {
        let env = Environment::new(configuration::ephemeral()).await;

        let mut stream = TcpStream::connect(env.listener_address()).await.unwrap();
        stream
            .write_all(&Handshake::new(env.canary.info_hash(), random::peer_id()).encode())
            .await
            .unwrap();

        let mut reply = [0u8; HANDSHAKE_LEN];
        stream.read_exact(&mut reply).await.unwrap();

        assert_eq!(
            reply.to_vec(),
            Handshake::new(env.canary.info_hash(), env.canary.own_peer_id()).encode()
        );

        env.stop().await;
    }

    #[tokio::test]
    async fn it_should_notify_the_unexpected_address_of_a_matching_handshake() {
        let mut env = Environment::new(configuration::ephemeral_with_expected_addresses(vec![])).await;

        let mut stream = TcpStream::connect(env.listener_address()).await.unwrap();
        stream
            .write_all(&Handshake::new(env.canary.info_hash(), random::peer_id()).encode())
            .await
            .unwrap();

        assert_eq!(env.notifications.next().await, Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));

        env.stop().await;
    }

    #[tokio::test]
    async fn it_should_drop_a_handshake_for_another_hash_without_a_reply_or_a_notification() {
        let mut env = Environment::new(configuration::ephemeral_with_expected_addresses(vec![])).await;

        let mut stream = TcpStream::connect(env.listener_address()).await.unwrap();
        stream
            .write_all(&Handshake::new(random::info_hash(), random::peer_id()).encode())
            .await
            .unwrap();

        let mut buffer = Vec::new();
        let read = tokio::time::timeout(Duration::from_secs(1), stream.read_to_end(&mut buffer))
            .await
            .expect("the listener should close the connection");

        assert!(read.map_or(true, |_| buffer.is_empty()));
        assert!(env.notifications.is_quiet().await);

        env.stop().await;
    }

    #[tokio::test]
    async fn it_should_drop_a_handshake_for_another_protocol() {
        let mut env = Environment::new(configuration::ephemeral_with_expected_addresses(vec![])).await;

        let mut handshake = Handshake::new(env.canary.info_hash(), random::peer_id()).encode();
        handshake[1] = b'b';

        let mut stream = TcpStream::connect(env.listener_address()).await.unwrap();
        stream.write_all(&handshake).await.unwrap();

        let mut buffer = Vec::new();
        let read = tokio::time::timeout(Duration::from_secs(1), stream.read_to_end(&mut buffer))
            .await
            .expect("the listener should close the connection");

        assert!(read.map_or(true, |_| buffer.is_empty()));
        assert!(env.notifications.is_quiet().await);

        env.stop().await;
    }

    #[tokio::test]
    async fn a_peer_that_completed_the_handshake_should_be_listed_to_tracker_clients() {
        let env = Environment::new(configuration::ephemeral()).await;

        let mut stream = TcpStream::connect(env.listener_address()).await.unwrap();
        let local_address = stream.local_addr().unwrap();
        stream
            .write_all(&Handshake::new(env.canary.info_hash(), random::peer_id()).encode())
            .await
            .unwrap();

        let mut reply = [0u8; HANDSHAKE_LEN];
        stream.read_exact(&mut reply).await.unwrap();

        let response = Client::new(env.tracker_address())
            .announce(&Query::new(&env.canary.info_hash(), &random::peer_id(), 6881))
            .await;

        let body = response.bytes().await.unwrap();
        let announce = BencodeRef::decode(&body, BDecodeOpt::default()).unwrap();

        let peers = announce.lookup_list(b"peers").unwrap();
        assert_eq!(peers.len(), 2);
        assert_eq!(peers[1].lookup_str(b"ip").unwrap(), local_address.ip().to_string());
        assert_eq!(peers[1].lookup_int(b"port").unwrap(), i64::from(local_address.port()));

        env.stop().await;
    }
}
