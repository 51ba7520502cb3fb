//! Read-only ABI surface of the Ethscriptions contract.

use alloy_sol_types::sol;

sol! {
    struct EthscriptionMetadata {
        address creator;
        address initialOwner;
        address currentOwner;
        bytes32 contentSha;
        bytes32 contentUriHash;
        uint256 blockNumber;
        uint256 transactionIndex;
        string mimetype;
        string mediaType;
        string mimeSubtype;
        bool esip6;
        bool isCompressed;
    }

    function getEthscription(bytes32 transactionHash) external view returns (EthscriptionMetadata);
    function getEthscriptionContent(bytes32 transactionHash) external view returns (bytes memory);
    function getOwner(bytes32 transactionHash) external view returns (address);
    function totalSupply() external view returns (uint256);
}
