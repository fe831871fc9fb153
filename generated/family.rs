#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNodeInfo {
    #[prost(string, tag = "1")]
    pub host: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub port: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoFamilyView {
    #[prost(message, repeated, tag = "1")]
    pub members: ::prost::alloc::vec::Vec<ProtoNodeInfo>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoChatMessage {
    #[prost(string, tag = "1")]
    pub text: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub origin_host: ::prost::alloc::string::String,
    #[prost(uint32, tag = "3")]
    pub origin_port: u32,
    #[prost(int64, tag = "4")]
    pub timestamp_ms: i64,
    /// Causal metadata. A message without it is stored under an empty clock.
    #[prost(string, tag = "5")]
    pub origin_node_id: ::prost::alloc::string::String,
    #[prost(map = "string, uint64", tag = "6")]
    pub vector_clock: ::std::collections::HashMap<::prost::alloc::string::String, u64>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoElectionReq {
    #[prost(message, optional, tag = "1")]
    pub candidate: ::core::option::Option<ProtoNodeInfo>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCoordinatorReq {
    #[prost(message, optional, tag = "1")]
    pub leader: ::core::option::Option<ProtoNodeInfo>,
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetFamilyReq {}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAck {}
#[doc = r" Generated client implementations."]
pub mod grpc_family_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcFamilyClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcFamilyClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcFamilyClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        #[doc = " Registers the caller as a family member and returns the full membership"]
        #[doc = " snapshot as seen by this node."]
        pub async fn join(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoNodeInfo>,
        ) -> Result<tonic::Response<super::ProtoFamilyView>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/family.GrpcFamily/Join");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Read-only membership snapshot. Doubles as a liveness probe."]
        pub async fn get_family(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetFamilyReq>,
        ) -> Result<tonic::Response<super::ProtoFamilyView>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/family.GrpcFamily/GetFamily");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Delivery target for the broadcast dispatcher."]
        pub async fn receive_chat(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoChatMessage>,
        ) -> Result<tonic::Response<super::ProtoAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/family.GrpcFamily/ReceiveChat");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Bully election message. Acknowledging tells the caller a higher-ranked"]
        #[doc = " node is alive."]
        pub async fn election(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoElectionReq>,
        ) -> Result<tonic::Response<super::ProtoAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/family.GrpcFamily/Election");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Coordinator announcement. The receiver accepts the announced leader"]
        #[doc = " unconditionally."]
        pub async fn coordinator(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoCoordinatorReq>,
        ) -> Result<tonic::Response<super::ProtoAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/family.GrpcFamily/Coordinator");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcFamilyClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcFamilyClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcFamilyClient {{ ... }}")
        }
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_family_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcFamilyServer."]
    #[async_trait]
    pub trait GrpcFamily: Send + Sync + 'static {
        #[doc = " Registers the caller as a family member and returns the full membership"]
        #[doc = " snapshot as seen by this node."]
        async fn join(
            &self,
            request: tonic::Request<super::ProtoNodeInfo>,
        ) -> Result<tonic::Response<super::ProtoFamilyView>, tonic::Status>;
        #[doc = " Read-only membership snapshot. Doubles as a liveness probe."]
        async fn get_family(
            &self,
            request: tonic::Request<super::ProtoGetFamilyReq>,
        ) -> Result<tonic::Response<super::ProtoFamilyView>, tonic::Status>;
        #[doc = " Delivery target for the broadcast dispatcher."]
        async fn receive_chat(
            &self,
            request: tonic::Request<super::ProtoChatMessage>,
        ) -> Result<tonic::Response<super::ProtoAck>, tonic::Status>;
        #[doc = " Bully election message. Acknowledging tells the caller a higher-ranked"]
        #[doc = " node is alive."]
        async fn election(
            &self,
            request: tonic::Request<super::ProtoElectionReq>,
        ) -> Result<tonic::Response<super::ProtoAck>, tonic::Status>;
        #[doc = " Coordinator announcement. The receiver accepts the announced leader"]
        #[doc = " unconditionally."]
        async fn coordinator(
            &self,
            request: tonic::Request<super::ProtoCoordinatorReq>,
        ) -> Result<tonic::Response<super::ProtoAck>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcFamilyServer<T: GrpcFamily> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcFamily> GrpcFamilyServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcFamilyServer<T>
    where
        T: GrpcFamily,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/family.GrpcFamily/Join" => {
                    #[allow(non_camel_case_types)]
                    struct JoinSvc<T: GrpcFamily>(pub Arc<T>);
                    impl<T: GrpcFamily> tonic::server::UnaryService<super::ProtoNodeInfo> for JoinSvc<T> {
                        type Response = super::ProtoFamilyView;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoNodeInfo>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).join(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = JoinSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/family.GrpcFamily/GetFamily" => {
                    #[allow(non_camel_case_types)]
                    struct GetFamilySvc<T: GrpcFamily>(pub Arc<T>);
                    impl<T: GrpcFamily> tonic::server::UnaryService<super::ProtoGetFamilyReq> for GetFamilySvc<T> {
                        type Response = super::ProtoFamilyView;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetFamilyReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_family(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetFamilySvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/family.GrpcFamily/ReceiveChat" => {
                    #[allow(non_camel_case_types)]
                    struct ReceiveChatSvc<T: GrpcFamily>(pub Arc<T>);
                    impl<T: GrpcFamily> tonic::server::UnaryService<super::ProtoChatMessage> for ReceiveChatSvc<T> {
                        type Response = super::ProtoAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoChatMessage>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).receive_chat(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = ReceiveChatSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/family.GrpcFamily/Election" => {
                    #[allow(non_camel_case_types)]
                    struct ElectionSvc<T: GrpcFamily>(pub Arc<T>);
                    impl<T: GrpcFamily> tonic::server::UnaryService<super::ProtoElectionReq> for ElectionSvc<T> {
                        type Response = super::ProtoAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoElectionReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).election(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = ElectionSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/family.GrpcFamily/Coordinator" => {
                    #[allow(non_camel_case_types)]
                    struct CoordinatorSvc<T: GrpcFamily>(pub Arc<T>);
                    impl<T: GrpcFamily> tonic::server::UnaryService<super::ProtoCoordinatorReq> for CoordinatorSvc<T> {
                        type Response = super::ProtoAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoCoordinatorReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).coordinator(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = CoordinatorSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcFamily> Clone for GrpcFamilyServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcFamily> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcFamily> tonic::transport::NamedService for GrpcFamilyServer<T> {
        const NAME: &'static str = "family.GrpcFamily";
    }
}
