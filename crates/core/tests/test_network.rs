//! Integration tests for network functionality.

#[cfg(test)]
mod integration_tests {
    use std::str::FromStr;

    use tapenet_network::{
        network, Error, Network, NetworkArgs, NetworkArgsBuilder, TerminationResult,
    };
    use tapenet_vm::core::memory::Memory;

    // IN [100] ; JNZ [100] 11 ; OUT 255 ; OUT 7 ; OUT 42 ; loop: IN [101] ; JNZ 1 11
    const SEND_ONCE: &str = "3,100,1005,100,11,104,255,104,7,104,42,3,101,1105,1,11";

    // instance 0 counts the idle sentinels it reads; at the third it sends (255, 0, 9). Every
    // packet it receives is answered with (255, 0, y + 1), or (255, 0, y) once y reached 12.
    const COUNTDOWN: &str = "3,100,1005,100,56,\
        3,101,1008,101,-1,103,1006,103,34,\
        1001,102,1,102,1008,102,3,103,1006,103,5,104,255,104,0,104,9,1105,1,5,\
        3,104,1007,104,12,103,1006,103,47,1001,104,1,104,\
        104,255,104,0,4,104,1105,1,5,\
        3,105,1105,1,56";

    #[tokio::test]
    async fn test_network_idle_then_terminate() {
        tapenet_tracing::init_test_tracing();

        let args = NetworkArgsBuilder::new()
            .target(SEND_ONCE.to_string())
            .pool_size(Some(2))
            .build()
            .expect("failed to build args");
        let result = network(args).await.expect("failed to run network");

        assert_eq!(
            result,
            TerminationResult { y: 42, first_y: Some(42), ticks: 2, idle_cycles: 2 }
        );
    }

    #[tokio::test]
    async fn test_network_default_pool() {
        let result = network(NetworkArgs {
            target: SEND_ONCE.to_string(),
            pool_size: None,
            nat_address: None,
            idle_sentinel: None,
        })
        .await
        .expect("failed to run network");

        assert_eq!(result.y, 42);
        assert_eq!(result.idle_cycles, 2);
    }

    #[tokio::test]
    async fn test_network_rejects_empty_pool() {
        let result = network(NetworkArgs {
            target: SEND_ONCE.to_string(),
            pool_size: Some(0),
            nat_address: None,
            idle_sentinel: None,
        })
        .await;

        assert!(matches!(result, Err(Error::InvalidPoolSize(0))));
    }

    #[tokio::test]
    async fn test_network_invalid_program() {
        let result = network(NetworkArgs {
            target: String::from("1,2,,3"),
            pool_size: Some(2),
            nat_address: None,
            idle_sentinel: None,
        })
        .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_network_converges_after_several_reinjections() {
        let memory = Memory::from_str(COUNTDOWN).expect("valid program");
        let mut network = Network::new(&memory, 4).expect("valid pool");

        let result = network.run().expect("failed to run network");

        // 9 is sent after three idle passes, answered with 10, 11, 12 and then 12 again
        assert_eq!(result.first_y, Some(9));
        assert_eq!(result.y, 12);
        assert_eq!(result.idle_cycles, 7);
        assert_eq!(result.ticks, 7);
        assert!(network.excluded().is_empty());
    }
}
