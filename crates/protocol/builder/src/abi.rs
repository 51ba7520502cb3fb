//! ABI encoding of the Ethscriptions contract's mutating entry points.

alloy_sol_types::sol! {
    struct TokenParams {
        string op;
        string protocol;
        string tick;
        string max;
        string lim;
        string amt;
    }

    struct CreateEthscriptionParams {
        bytes32 transactionHash;
        address initialOwner;
        string contentUri;
        string mimetype;
        string mediaType;
        string mimeSubtype;
        bool esip6;
        bool isCompressed;
        TokenParams tokenParams;
    }

    function createEthscription(CreateEthscriptionParams params) external;
    function transferEthscription(address to, bytes32 ethscriptionTxHash) external;
    function transferEthscriptionForPreviousOwner(
        address to,
        bytes32 ethscriptionTxHash,
        address expectedPreviousOwner
    ) external;
}
